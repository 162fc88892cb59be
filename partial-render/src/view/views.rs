//! View engine backed by MiniJinja.
//!
//! Views are looked up by name through a list of location formats, e.g.
//! `{name}.html` then `shared/{name}.html`. A full render evaluates the
//! view start first; if it (or the view itself) sets `layout`, the output is
//! rendered into that layout as `body`. A partial render skips both.
//!
//! Variables available in every view: `model`, `temp_data` and `trace_id`.
use async_trait::async_trait;
use minijinja::{context, path_loader, Environment, ErrorKind, State, Value};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{Error, HostContext, RenderContext, View, ViewEngine};
use crate::config::ViewsConfig;

pub struct Views {
    env: Environment<'static>,
    locations: Vec<String>,
    view_start: String,
}

impl Views {
    /// Views read from the directory in the config.
    pub fn new(config: &ViewsConfig) -> Result<Self, crate::config::Error> {
        config.validate()?;

        let mut env = Environment::new();
        env.set_loader(path_loader(&config.path));

        Ok(Self {
            env,
            locations: config.locations.clone(),
            view_start: config.view_start.clone(),
        })
    }

    /// Views registered by hand with [`Views::add_view`].
    pub fn in_memory() -> Self {
        let config = ViewsConfig::default();

        Self {
            env: Environment::new(),
            locations: config.locations,
            view_start: config.view_start,
        }
    }

    /// Register a view under its full path, e.g. `shared/_Layout.html`.
    pub fn add_view(
        &mut self,
        path: impl ToString,
        source: impl ToString,
    ) -> Result<&mut Self, Error> {
        self.env
            .add_template_owned(path.to_string(), source.to_string())?;
        Ok(self)
    }

    /// Replace the location formats. Each one needs a `{name}` placeholder.
    pub fn locations(mut self, locations: Vec<String>) -> Result<Self, crate::config::Error> {
        ViewsConfig {
            locations: locations.clone(),
            ..Default::default()
        }
        .validate()?;

        self.locations = locations;
        Ok(self)
    }

    /// Location formats with `name` filled in, in search order.
    ///
    /// A name starting with `/` is taken as a path and isn't expanded.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        match name.strip_prefix('/') {
            Some(path) => vec![path.to_string()],
            None => self
                .locations
                .iter()
                .map(|location| location.replace("{name}", name))
                .collect(),
        }
    }

    /// Path of the first location that has the view.
    fn lookup(&self, name: &str) -> Result<Option<String>, Error> {
        for path in self.candidates(name) {
            match self.env.get_template(&path) {
                Ok(_) => return Ok(Some(path)),
                Err(err) if err.kind() == ErrorKind::TemplateNotFound => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(None)
    }

    fn require(&self, name: &str) -> Result<String, Error> {
        self.lookup(name)?.ok_or_else(|| Error::ViewNotFound {
            name: name.to_string(),
            searched: self.candidates(name),
        })
    }

    /// Run the view and return its output.
    pub fn execute(&self, view: &View, context: &RenderContext<'_>) -> Result<String, Error> {
        let model = Value::from_serialize(context.model());
        let temp_data = Value::from_serialize(context.temp_data());
        let trace_id = context.host().trace_id().to_string();
        let vars = context! { model => model, temp_data => temp_data, trace_id => trace_id };

        let template = self.env.get_template(view.path())?;

        if !view.main_page() {
            return Ok(template.render(&vars)?);
        }

        let mut layout = match self.lookup(&self.view_start)? {
            Some(path) => layout_of(&self.env.get_template(&path)?.eval_to_state(&vars)?),
            None => None,
        };

        let (body, state) = template.render_and_return_state(&vars)?;
        if let Some(own) = layout_of(&state) {
            layout = Some(own);
        }

        // An empty layout turns it off.
        match layout.filter(|layout| !layout.is_empty()) {
            None => Ok(body),
            Some(layout) => {
                let path = self.require(&layout)?;
                debug!("view \"{}\" uses layout \"{}\"", view.name(), path);

                let body = Value::from_safe_string(body);
                Ok(self
                    .env
                    .get_template(&path)?
                    .render(context! {
                        body => body,
                        model => model,
                        temp_data => temp_data,
                        trace_id => trace_id,
                    })?)
            }
        }
    }
}

fn layout_of(state: &State<'_, '_>) -> Option<String> {
    state
        .lookup("layout")
        .filter(|value| !value.is_undefined() && !value.is_none())
        .map(|value| match value.as_str() {
            Some(layout) => layout.to_string(),
            None => value.to_string(),
        })
}

#[async_trait]
impl ViewEngine for Views {
    fn find_view(&self, _host: &HostContext, name: &str, main_page: bool) -> Result<View, Error> {
        let path = self.require(name)?;
        Ok(View::new(name, path, main_page))
    }

    async fn render(&self, view: &View, context: &mut RenderContext<'_>) -> Result<(), Error> {
        let output = self.execute(view, context)?;
        context.sink().write_all(output.as_bytes()).await?;

        Ok(())
    }
}
