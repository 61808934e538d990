//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to give the library its identity:
//! names shown to the user, the documentation link and the HTTP user agent.

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the command name)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// URL for the CLI documentation
    fn docs_url(&self) -> &'static str;

    /// Environment variable naming a local template checkout to use instead
    /// of GitHub
    fn template_dir_env(&self) -> &'static str;

    /// Environment variable overriding the repository archive host (for development use)
    fn archive_host_env(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> String {
        format!("{}/{}", self.name(), env!("CARGO_PKG_VERSION"))
    }
}
