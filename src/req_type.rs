use crate::Component;

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct PartialComponent {
    /// The component the client has currently mounted.
    pub component: Component,
    pub only: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) enum InertiaRequestType {
    Standard,
    Partial(PartialComponent),
}

impl InertiaRequestType {
    /// Returns the partial requirements only if they apply to `component`. A partial reload
    /// that targets another component is rendered as a standard visit.
    #[inline]
    pub fn partials_for(&self, component: &Component) -> Option<&PartialComponent> {
        match self {
            InertiaRequestType::Partial(partials)
                if !partials.only.is_empty() && &partials.component == component =>
            {
                Some(partials)
            }
            _ => None,
        }
    }
}
