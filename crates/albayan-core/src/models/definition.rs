/// Extension every uploaded template must carry.
pub const TEMPLATE_EXTENSION: &str = "odt";
