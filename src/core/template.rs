//! Template lookup and rendering.
//!
//! Templates are looked up by name across a list of candidates, first
//! under the `sealpost/` namespace and then by the bare name, so projects
//! can override the namespaced copy or keep templates flat.

use std::path::PathBuf;

use tera::Tera;
use tracing::debug;

use crate::core::constants;
use crate::error::{Result, TemplateError};

pub use tera::Context;

/// Select-and-render template interface.
pub trait TemplateRenderer {
    /// Render the first candidate that exists.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotFound` when no candidate exists and
    /// `TemplateError::Render` when the chosen template fails to render.
    fn select_and_render(&self, candidates: &[String], context: &Context) -> Result<String>;
}

/// Candidate names for `name`, namespaced first.
pub fn candidates(name: &str) -> Vec<String> {
    vec![
        format!("{}/{}", constants::TEMPLATE_NAMESPACE, name),
        name.to_string(),
    ]
}

/// Renderer backed by tera.
///
/// `.html` templates are autoescaped; `.txt` templates are not.
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Load every file under each directory. Earlier directories win when
    /// two define the same name; missing directories are skipped.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Load` if a template fails to parse.
    pub fn from_dirs(dirs: &[PathBuf]) -> Result<Self> {
        let mut tera = Tera::default();
        for dir in dirs {
            if !dir.is_dir() {
                debug!(dir = %dir.display(), "template dir missing, skipping");
                continue;
            }
            let glob = format!("{}/**/*", dir.display());
            let loaded = Tera::new(&glob).map_err(|e| TemplateError::Load(describe(&e)))?;
            tera.extend(&loaded)
                .map_err(|e| TemplateError::Load(describe(&e)))?;
        }

        debug!(templates = tera.get_template_names().count(), "templates loaded");
        Ok(Self { tera })
    }

    /// Build from in-memory `(name, source)` pairs.
    pub fn from_templates<'t>(templates: impl IntoIterator<Item = (&'t str, &'t str)>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|e| TemplateError::Load(describe(&e)))?;
        Ok(Self { tera })
    }

    fn has(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

impl TemplateRenderer for TeraRenderer {
    fn select_and_render(&self, candidates: &[String], context: &Context) -> Result<String> {
        let name = candidates
            .iter()
            .find(|name| self.has(name))
            .ok_or_else(|| TemplateError::NotFound(candidates.to_vec()))?;

        debug!(template = %name, "rendering");
        self.tera.render(name, context).map_err(|e| {
            TemplateError::Render {
                name: name.clone(),
                reason: describe(&e),
            }
            .into()
        })
    }
}

/// Flatten a tera error and its sources into one line.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
