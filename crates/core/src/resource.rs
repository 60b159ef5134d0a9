//! Naming of resource types, used in "not found" messages.

/// A payload type that names the resource it represents.
pub trait Resource {
    /// Human-readable resource name, e.g. `"Product"`.
    const NAME: &'static str;
}

/// A collection is named after its element.
impl<T: Resource> Resource for Vec<T> {
    const NAME: &'static str = T::NAME;
}
