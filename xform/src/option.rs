use crate::graphics::DEFAULT_PRECISION;
use educe::Educe;

/// What `stop_transform` removes from the log of the closing scope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ScopeClosePolicy {
    /// Remove the last logged matrix only, later scopes opened at the same
    /// depth reset the log.
    #[default]
    PopLast,
    /// Discard the whole log.
    ClearAll,
}

/// Option for TransformStack
#[derive(Debug, Educe, Clone)]
#[educe(Default)]
pub struct TransformOption {
    /// Decimals of `cm` operands.
    #[educe(Default(expression = DEFAULT_PRECISION))]
    pub(crate) precision: usize,
    pub(crate) close_policy: ScopeClosePolicy,
    /// Operating on a surface other than the one owning the innermost open
    /// scope is an error if true, a warning otherwise.
    #[educe(Default = true)]
    pub(crate) strict_surfaces: bool,
}

impl TransformOption {
    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn close_policy(&self) -> ScopeClosePolicy {
        self.close_policy
    }

    pub fn strict_surfaces(&self) -> bool {
        self.strict_surfaces
    }
}

#[derive(Educe)]
#[educe(Default(new))]
pub struct TransformOptionBuilder(TransformOption);

impl TransformOptionBuilder {
    pub fn precision(mut self, precision: usize) -> Self {
        self.0.precision = precision;
        self
    }

    pub fn close_policy(mut self, policy: ScopeClosePolicy) -> Self {
        self.0.close_policy = policy;
        self
    }

    pub fn strict_surfaces(mut self, strict: bool) -> Self {
        self.0.strict_surfaces = strict;
        self
    }

    pub fn build(self) -> TransformOption {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn default_option() {
        let opt = TransformOption::default();
        assert_eq!(6, opt.precision());
        assert_eq!(ScopeClosePolicy::PopLast, opt.close_policy());
        assert!(opt.strict_surfaces());
    }

    #[test]
    fn builder() {
        let opt = TransformOptionBuilder::new()
            .precision(3)
            .close_policy(ScopeClosePolicy::ClearAll)
            .strict_surfaces(false)
            .build();
        assert_eq!(3, opt.precision());
        assert_eq!(ScopeClosePolicy::ClearAll, opt.close_policy());
        assert!(!opt.strict_surfaces());
    }

    #[test_case("pop-last" => Ok(ScopeClosePolicy::PopLast))]
    #[test_case("clear-all" => Ok(ScopeClosePolicy::ClearAll))]
    #[test_case("clear" => Err(strum::ParseError::VariantNotFound))]
    fn parse_close_policy(s: &str) -> Result<ScopeClosePolicy, strum::ParseError> {
        s.parse()
    }

    #[test]
    fn display_close_policy() {
        assert_eq!("clear-all", ScopeClosePolicy::ClearAll.to_string());
    }
}
