/// `FromStr` for a clap `ValueEnum`, accepting the same names and aliases
/// as the command line, case-insensitively
macro_rules! value_enum_from_str {
    ($($enum_type:ty => $what:literal),+ $(,)?) => {
        $(
            impl std::str::FromStr for $enum_type {
                type Err = $crate::primitives::ConfigError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <Self as clap::ValueEnum>::from_str(s.trim(), true).map_err(|_| {
                        $crate::primitives::ConfigError::ParseError {
                            value: s.to_string(),
                            reason: format!("invalid {}", $what),
                        }
                    })
                }
            }
        )+
    };
}

pub(crate) use value_enum_from_str;
