use crate::Registry;

pub const ACTIVITYSTREAMS_CONTEXT : &str = "https://www.w3.org/ns/activitystreams";

pub trait LD {
	/// attach an `@context` covering activitystreams and every extra term of given registry
	fn ld_context(self, registry: &Registry) -> Self;
}

impl LD for serde_json::Value {
	fn ld_context(mut self, registry: &Registry) -> Self {
		if let Some(obj) = self.as_object_mut() {
			let mut context = vec![serde_json::Value::String(ACTIVITYSTREAMS_CONTEXT.into())];
			if !registry.context().is_empty() {
				let terms = registry.context()
					.iter()
					.map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
					.collect();
				context.push(serde_json::Value::Object(terms));
			}
			let context = if context.len() == 1 {
				context.remove(0)
			} else {
				serde_json::Value::Array(context)
			};
			obj.insert("@context".to_string(), context);
		} else {
			tracing::warn!("cannot add @context to json value different than object");
		}
		self
	}
}
