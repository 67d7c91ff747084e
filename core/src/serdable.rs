pub use self::glob::GlobPattern;

pub mod glob {
    use std::ops::Deref;

    use ::glob::PatternError;
    use ::serde::{
        de::{self, Visitor},
        Deserialize,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GlobPattern(::glob::Pattern);

    impl GlobPattern {
        pub fn parse(pattern: &str) -> Result<Self, PatternError> {
            ::glob::Pattern::new(pattern).map(Self)
        }
    }

    impl Deref for GlobPattern {
        type Target = ::glob::Pattern;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl std::fmt::Display for GlobPattern {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0.as_str())
        }
    }

    impl<'de> Deserialize<'de> for GlobPattern {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct GlobPatternVisitor;

            impl<'de> Visitor<'de> for GlobPatternVisitor {
                type Value = GlobPattern;

                fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    write!(f, "a glob pattern string")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Self::Value::parse(v).map_err(de::Error::custom)
                }
            }

            deserializer.deserialize_str(GlobPatternVisitor)
        }
    }

}
