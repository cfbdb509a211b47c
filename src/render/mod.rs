//! Unit file rendering with minijinja.
//!
//! The renderer is an ordinary value: build it once with
//! [`UnitRenderer::new`] and hand it to whoever composes scripts.
//!
//! systemd reads `ExecStart=` and `Environment=` with its own rules: `%`
//! starts a specifier, `$` starts a variable reference (`ExecStart=` only) and
//! backslashes are C escapes even inside single quotes. Each word is escaped
//! for those rules first and then quoted by [`crate::shell::quote`].

use minijinja::{context, Environment, UndefinedBehavior};

use crate::command::NormalizedCommand;
use crate::environment::EnvAssignment;
use crate::error::{Result, SpoolError};
use crate::models::UnitDescriptor;
use crate::shell;

/// Name of the unit body template.
pub const UNIT_TEMPLATE: &str = "unit.service";

const UNIT_TEMPLATE_SOURCE: &str = include_str!("templates/unit.service.j2");

/// Renders unit files from the built-in templates.
pub struct UnitRenderer {
    env: Environment<'static>,
}

impl UnitRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_filter("specifiers", |value: String| escape_specifiers(&value));
        env.add_filter("unit_word", |value: String| unit_word(&value, false));

        env.add_template(UNIT_TEMPLATE, UNIT_TEMPLATE_SOURCE)
            .map_err(|e| template_error(UNIT_TEMPLATE, e))?;

        Ok(Self { env })
    }

    /// Render the unit body for `command`.
    ///
    /// `environment` is consumed in order and the first invalid assignment
    /// aborts rendering.
    pub fn render_unit<I>(
        &self,
        unit: &UnitDescriptor,
        command: &NormalizedCommand,
        environment: I,
    ) -> Result<String>
    where
        I: IntoIterator<Item = Result<EnvAssignment>>,
    {
        let environment = environment
            .into_iter()
            .map(|assignment| assignment.map(|a| a.to_string()))
            .collect::<Result<Vec<String>>>()?;

        let description = unit
            .description
            .clone()
            .unwrap_or_else(|| unit.name.clone());

        let template = self
            .env
            .get_template(UNIT_TEMPLATE)
            .map_err(|e| template_error(UNIT_TEMPLATE, e))?;

        template
            .render(context! {
                description => description,
                unit => unit.name,
                user => unit.user,
                group => unit.group,
                working_directory => unit.working_directory,
                environment => environment,
                command => exec_start_line(command.argv()),
                restart => unit.restart.as_str(),
                install => unit.install,
                wanted_by => unit.scope.wanted_by(),
            })
            .map_err(|e| template_error(UNIT_TEMPLATE, e))
    }
}

/// Build the `ExecStart=` value for an argv.
pub fn exec_start_line(argv: &[String]) -> String {
    shell::quote_join(argv.iter().map(|word| escape_word(word, true)))
}

/// A single quoted systemd word, e.g. for `Environment=`.
fn unit_word(value: &str, expand_dollar: bool) -> String {
    shell::quote(&escape_word(value, expand_dollar))
}

fn escape_specifiers(value: &str) -> String {
    value.replace('%', "%%")
}

fn escape_word(word: &str, expand_dollar: bool) -> String {
    let mut escaped = String::with_capacity(word.len());
    for ch in word.chars() {
        match ch {
            '\\' => escaped.push_str(r"\\"),
            '%' => escaped.push_str("%%"),
            '$' if expand_dollar => escaped.push_str("$$"),
            '\n' => escaped.push_str(r"\n"),
            '\t' => escaped.push_str(r"\t"),
            c if c.is_control() => escaped.push_str(&format!("\\x{:02x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

fn template_error(template: &str, error: minijinja::Error) -> SpoolError {
    SpoolError::Template {
        template: template.to_string(),
        message: error.to_string(),
    }
}
