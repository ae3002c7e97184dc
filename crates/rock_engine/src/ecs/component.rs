//! Component trait

/// Marker trait for components
///
/// Data fragments and zero-size tags both implement this; the world keys
/// storage by the concrete type.
pub trait Component: 'static + Send + Sync {}
