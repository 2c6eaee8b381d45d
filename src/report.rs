use bollard::models::ContainerInspectResponse;
use minijinja::Environment;

/// Default message. The template sees the inspect data with docker's own
/// field names (`Id`, `Name`, `Config.Image`, `State.ExitCode`, ...).
pub const DEFAULT_FORMAT: &str = "Container {{ Id }} ({{ Config.Image }}) was killed by OOM killer";

const TEMPLATE_NAME: &str = "report";

/// Renders the message for an OOM killed container from a user template.
pub struct ReportFormatter<'source> {
    env: Environment<'source>,
}

impl<'source> ReportFormatter<'source> {
    /// Compiles the template once so syntax errors surface before any
    /// container is processed.
    pub fn new(template: &'source str) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        env.add_template(TEMPLATE_NAME, template)?;
        Ok(Self { env })
    }

    pub fn render(&self, container: &ContainerInspectResponse) -> Result<String, minijinja::Error> {
        self.env.get_template(TEMPLATE_NAME)?.render(container)
    }
}
