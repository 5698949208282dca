//! Route table
//!
//! Mirrors the application's page layout: public auth pages, a protected
//! layout whose children all require a session, and a catch-all.

/// Route names. Redirects always target a name, never a path.
pub mod names {
    pub const LOGIN: &str = "login";
    pub const REGISTER: &str = "register";
    pub const ACCESS_DENIED: &str = "accessDenied";
    pub const ERROR: &str = "error";
    pub const DASHBOARD: &str = "dashboard";
    pub const COURSE_STRUCTURES: &str = "coursestructures";
    // The study pages kept the names of the template pages they replaced
    pub const ALL_SUBJECTS: &str = "formlayout";
    pub const POST_STUDY_PLAN: &str = "input";
    pub const STUDY_PLAN: &str = "button";
    pub const LANDING: &str = "landing";
    pub const NOT_FOUND: &str = "notfound";
}

/// One entry in the route tree.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    /// Absolute path
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub requires_auth: bool,
    /// Static redirect to another path
    pub redirect: Option<&'static str>,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn page(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name: Some(name),
            requires_auth: false,
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            requires_auth: false,
            redirect: Some(to),
            children: Vec::new(),
        }
    }

    /// Unnamed layout record grouping child pages.
    pub fn layout(path: &'static str, children: Vec<RouteRecord>) -> Self {
        Self {
            path,
            name: None,
            requires_auth: false,
            redirect: None,
            children,
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// Result of matching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A named page; `requires_auth` is true if any record on the matched
    /// chain requires it.
    Page(ResolvedRoute),
    /// The matched record redirects to another path.
    Redirect(&'static str),
}

/// A named route as seen by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: &'static str,
    pub path: String,
    pub requires_auth: bool,
}

impl ResolvedRoute {
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Ordered route tree. First match wins; unknown paths resolve to
/// [`names::NOT_FOUND`].
#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
}

impl RouteTable {
    pub fn new(records: Vec<RouteRecord>) -> Self {
        Self { records }
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        let path = normalize(path);
        for record in &self.records {
            if let Some(resolution) = match_record(record, &path, false) {
                return resolution;
            }
        }
        Resolution::Page(ResolvedRoute {
            name: names::NOT_FOUND,
            path,
            requires_auth: false,
        })
    }

    /// Path of the named route.
    pub fn path_of(&self, name: &str) -> Option<&'static str> {
        fn find(records: &[RouteRecord], name: &str) -> Option<&'static str> {
            records.iter().find_map(|r| {
                if r.name == Some(name) {
                    Some(r.path)
                } else {
                    find(&r.children, name)
                }
            })
        }
        find(&self.records, name)
    }

    /// Every named route, depth first.
    pub fn named_routes(&self) -> Vec<(&'static str, &'static str)> {
        fn walk(records: &[RouteRecord], out: &mut Vec<(&'static str, &'static str)>) {
            for record in records {
                if let Some(name) = record.name {
                    out.push((name, record.path));
                }
                walk(&record.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.records, &mut out);
        out
    }
}

fn match_record(record: &RouteRecord, path: &str, parent_auth: bool) -> Option<Resolution> {
    let requires_auth = parent_auth || record.requires_auth;

    if record.path == path {
        if let Some(to) = record.redirect {
            return Some(Resolution::Redirect(to));
        }
        if let Some(name) = record.name {
            return Some(Resolution::Page(ResolvedRoute {
                name,
                path: path.to_string(),
                requires_auth,
            }));
        }
    }

    record
        .children
        .iter()
        .find_map(|child| match_record(child, path, requires_auth))
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            RouteRecord::redirect("/", "/auth/login"),
            RouteRecord::page("/auth/login", names::LOGIN),
            RouteRecord::page("/auth/login/register", names::REGISTER),
            RouteRecord::page("/auth/access", names::ACCESS_DENIED),
            RouteRecord::page("/auth/error", names::ERROR),
            RouteRecord::layout(
                "/",
                vec![
                    RouteRecord::page("/dashboard", names::DASHBOARD),
                    RouteRecord::page("/components/coursestructures", names::COURSE_STRUCTURES),
                    RouteRecord::page("/components/allsubjects", names::ALL_SUBJECTS),
                    RouteRecord::page("/components/poststudyplan", names::POST_STUDY_PLAN),
                    RouteRecord::page("/components/studyplan", names::STUDY_PLAN),
                ],
            )
            .requires_auth(),
            RouteRecord::page("/landing", names::LANDING),
        ])
    }
}
