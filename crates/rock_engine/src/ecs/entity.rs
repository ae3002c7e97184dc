//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// An index into stable slot storage plus a generation, so a stale
    /// identifier never aliases an entity created later in the same slot.
    pub struct Entity;
}
