//! Command execution context
//!
//! Builds the session stack for a command: config, file-backed credential
//! store, session manager and API gateway. After the command runs,
//! [`CommandContext::finish`] plays the part of the hosting UI and reacts to
//! session events by navigating to the login page.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use tokio::sync::broadcast;

use crate::cli::{GlobalOptions, OutputFormat};
use gradebook::client::{ApiClient, HttpAuthenticator};
use gradebook::config::Config;
use gradebook::error::Result;
use gradebook::router::{RouteTable, Router};
use gradebook::session::{FileStore, SessionEvent, SessionManager};

pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Resolved config file path
    pub config_path: PathBuf,
    /// Resolved session file path
    pub session_path: PathBuf,
    pub session: Arc<SessionManager>,
    pub client: ApiClient,
    pub format: OutputFormat,
    events: broadcast::Receiver<SessionEvent>,
}

impl CommandContext {
    /// Create the context. Does not touch the network.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_from(&config_path)?;
        let options = config.client_options(opts.api_url_ref());
        let session_path = config.session_path()?;

        let store = Arc::new(FileStore::new(session_path.clone()));
        let auth = Arc::new(HttpAuthenticator::new(&options)?);
        let session = Arc::new(SessionManager::new(store, auth));
        let events = session.subscribe();
        let client = ApiClient::new(&options, session.clone())?;

        Ok(Self {
            config,
            config_path,
            session_path,
            session,
            client,
            format: opts.format,
            events,
        })
    }

    /// A router guarded by this context's session.
    pub fn router(&self) -> Router<SessionManager> {
        Router::new(RouteTable::default(), self.session.clone())
    }

    /// Drain session events raised while the command ran.
    pub fn finish(mut self) -> Result<()> {
        let mut router = self.router();
        while let Ok(event) = self.events.try_recv() {
            let landing = router.handle_session_event(event)?;
            match event {
                SessionEvent::LoggedOut => {
                    println!("{} Logged out", "✓".green());
                }
                SessionEvent::Expired => {
                    eprintln!(
                        "{} Your session has ended. Run {} to continue (redirected to {}).",
                        "⚠".yellow(),
                        "gradebook login".cyan(),
                        landing.path
                    );
                }
            }
        }
        Ok(())
    }
}
