//! Build variants and per-variant storage.

/// One of the two build configurations managed by vswitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Debug build tree
    Debug,
    /// Release build tree
    Release,
}

impl Variant {
    /// Both variants, debug first.
    pub const ALL: [Variant; 2] = [Variant::Debug, Variant::Release];

    /// Get the variant name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Debug => "debug",
            Variant::Release => "release",
        }
    }

    /// The variant that gets deactivated when this one is activated.
    pub fn other(&self) -> Variant {
        match self {
            Variant::Debug => Variant::Release,
            Variant::Release => Variant::Debug,
        }
    }

    /// Value passed as `CMAKE_BUILD_TYPE`.
    pub fn build_type(&self) -> &'static str {
        match self {
            Variant::Debug => "Debug",
            Variant::Release => "Release",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value stored once per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMap<T> {
    pub debug: T,
    pub release: T,
}

impl<T> VariantMap<T> {
    pub fn new(debug: T, release: T) -> Self {
        VariantMap { debug, release }
    }

    /// Build a map by evaluating `f` for each variant.
    pub fn from_fn(mut f: impl FnMut(Variant) -> T) -> Self {
        VariantMap {
            debug: f(Variant::Debug),
            release: f(Variant::Release),
        }
    }

    pub fn get(&self, variant: Variant) -> &T {
        match variant {
            Variant::Debug => &self.debug,
            Variant::Release => &self.release,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Variant::Debug.to_string(), "debug");
        assert_eq!(Variant::Release.as_str(), "release");
        assert_eq!(Variant::Debug.build_type(), "Debug");
        assert_eq!(Variant::Release.build_type(), "Release");
    }

    #[test]
    fn test_other_is_involution() {
        for v in Variant::ALL {
            assert_ne!(v.other(), v);
            assert_eq!(v.other().other(), v);
        }
    }

    #[test]
    fn test_variant_map_get() {
        let map = VariantMap::from_fn(|v| v.as_str().len());
        assert_eq!(*map.get(Variant::Debug), 5);
        assert_eq!(*map.get(Variant::Release), 7);

        let map = VariantMap::new("a", "b");
        assert_eq!(*map.get(Variant::Release), "b");
    }
}
