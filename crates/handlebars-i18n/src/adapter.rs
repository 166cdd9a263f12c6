//! Registration of the helpers with a [`Handlebars`] registry.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason, ScopedJson,
};
use serde_json::{Map, Value};

use crate::options::InvocationOptions;
use crate::registry::{ALIASES, HelperFn, HelperRegistry};
use crate::value::RenderValue;

/// A registry helper exposed to Handlebars templates.
pub struct I18nHelper {
    name: &'static str,
    helper: HelperFn,
}

impl I18nHelper {
    pub fn new(name: &'static str, helper: HelperFn) -> Self {
        Self { name, helper }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn invoke(&self, h: &Helper<'_>) -> Result<RenderValue, RenderError> {
        let args: Vec<Value> = h.params().iter().map(|param| param.value().clone()).collect();
        let hash: Map<String, Value> = h
            .hash()
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.value().clone()))
            .collect();
        let options = InvocationOptions::with_hash(hash);

        (self.helper)(&args, Some(&options)).map_err(|error| {
            RenderErrorReason::Other(format!("helper '{}': {error}", h.name())).into()
        })
    }
}

impl HelperDef for I18nHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        Ok(ScopedJson::Derived(self.invoke(h)?.to_json()))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        _: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        match self.invoke(h)? {
            RenderValue::Raw(text) => out.write(&text)?,
            RenderValue::Escaped(text) if rc.is_disable_escape() => out.write(&text)?,
            RenderValue::Escaped(text) => out.write(&r.get_escape_fn()(&text))?,
            RenderValue::Bool(b) => out.write(if b { "true" } else { "false" })?,
            RenderValue::Missing => {}
        }
        Ok(())
    }
}

/// Register every helper of `registry` with `handlebars`, under its
/// canonical name and its aliases.
pub fn register_helpers(handlebars: &mut Handlebars<'_>, registry: &HelperRegistry) {
    for (name, helper) in registry.iter() {
        handlebars.register_helper(name, Box::new(I18nHelper::new(name, helper.clone())));
    }
    for (alias, canonical) in ALIASES {
        if let Some(helper) = registry.get(canonical) {
            handlebars.register_helper(alias, Box::new(I18nHelper::new(canonical, helper.clone())));
        }
    }
}
