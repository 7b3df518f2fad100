use crate::{Entity, Node};

pub const PUBLIC : &str = "https://www.w3.org/ns/activitystreams#Public";

fn ids(nodes: &[Node]) -> Vec<String> {
	nodes.iter()
		.filter_map(|x| Some(x.id().ok()?.to_string()))
		.collect()
}

pub trait Addressed {
	fn addressed(&self) -> Vec<String>;
	fn mentioning(&self) -> Vec<String>;

	/// public collection is addressed, also in its compacted forms
	fn is_public(&self) -> bool {
		self.addressed()
			.iter()
			.any(|x| x == PUBLIC || x == "as:Public" || x == "Public")
	}
}

impl Addressed for Entity {
	fn addressed(&self) -> Vec<String> {
		let mut to : Vec<String> = ids(self.get("to"));
		to.append(&mut ids(self.get("bto")));
		to.append(&mut ids(self.get("cc")));
		to.append(&mut ids(self.get("bcc")));
		to
	}

	fn mentioning(&self) -> Vec<String> {
		let mut to : Vec<String> = ids(self.get("to"));
		to.append(&mut ids(self.get("bto")));
		to
	}
}
