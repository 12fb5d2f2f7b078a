use handlebars::{Handlebars, TemplateError};

pub const DASHBOARD: &str = "dashboard";
pub const LOGIN: &str = "login";

/// Build the template registry used by the HTML pages.
///
/// Templates are compiled into the binary; values are HTML-escaped on render.
pub fn registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars.register_template_string(DASHBOARD, include_str!("dashboard.hbs"))?;
    handlebars.register_template_string(LOGIN, include_str!("login.hbs"))?;
    Ok(handlebars)
}
