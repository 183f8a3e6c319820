use crate::props::{InertiaProp, InertiaProps};

/// Props merged into every page rendered by an [`Inertia`] instance.
///
/// It is owned by the [`Inertia`] singleton, so it can only be mutated before the instance
/// is handed to the http server. Every request then reads the same shared props.
///
/// [`Inertia`]: crate::Inertia
#[derive(Clone, Debug, Default)]
pub struct SharedData {
    props: InertiaProps,
}

impl SharedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `props` into the shared props, key by key. Keys that already exist are
    /// overwritten, every other key is kept.
    pub fn share(&mut self, props: InertiaProps) -> &mut Self {
        self.props.extend(props);
        self
    }

    pub fn share_prop(&mut self, key: impl Into<String>, prop: impl Into<InertiaProp>) -> &mut Self {
        self.props.insert(key.into(), prop.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&InertiaProp> {
        self.props.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Returns the shared props merged with a page's own `props`. The page
    /// props take precedence on conflicting keys.
    pub(crate) fn merged_with(&self, props: InertiaProps) -> InertiaProps {
        let mut merged = self.props.clone();
        merged.extend(props);
        merged
    }
}

impl From<InertiaProps> for SharedData {
    fn from(props: InertiaProps) -> Self {
        Self { props }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::{json, Value};

    fn data(shared: &SharedData, key: &str) -> Option<Value> {
        match shared.get(key) {
            Some(InertiaProp::Data(value)) => Some(value.clone()),
            _ => None,
        }
    }

    #[test]
    fn disjoint_shares_are_combined() {
        let mut shared = SharedData::new();
        shared
            .share_prop("shared", json!("data"))
            .share_prop("additional", json!("shared data"));

        assert_eq!(data(&shared, "shared"), Some(json!("data")));
        assert_eq!(data(&shared, "additional"), Some(json!("shared data")));
    }

    #[test]
    fn later_shares_win_and_unrelated_keys_persist() {
        let mut first = InertiaProps::new();
        first.insert("locale".into(), json!("en").into());
        first.insert("app".into(), json!("inertia").into());

        let mut second = InertiaProps::new();
        second.insert("locale".into(), json!("pt-BR").into());

        let mut shared = SharedData::from(first);
        shared.share(second);

        assert_eq!(data(&shared, "locale"), Some(json!("pt-BR")));
        assert_eq!(data(&shared, "app"), Some(json!("inertia")));
    }

    #[test]
    fn page_props_take_precedence_over_shared_props() {
        let mut shared = SharedData::new();
        shared.share_prop("title", json!("shared")).share_prop("user", json!("John"));

        let mut page = InertiaProps::new();
        page.insert("title".into(), json!("page").into());

        let merged = SharedData::from(shared.merged_with(page));
        assert_eq!(data(&merged, "title"), Some(json!("page")));
        assert_eq!(data(&merged, "user"), Some(json!("John")));
        assert!(!shared.is_empty());
    }
}
