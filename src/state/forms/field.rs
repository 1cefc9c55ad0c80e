//! Wizard field identifiers

/// A user-editable field of the onboarding wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardField {
    CompanyName,
    TaxId,
    ContactName,
    Email,
    Tier,
}

impl WizardField {
    /// Wire name of the field, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::TaxId => "tax_id",
            Self::ContactName => "contact_name",
            Self::Email => "email",
            Self::Tier => "tier",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::TaxId => "Tax ID / Registration Number",
            Self::ContactName => "Primary Contact Name",
            Self::Email => "Email Address",
            Self::Tier => "Onboarding Tier",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::CompanyName => "e.g. Acme Corp",
            Self::TaxId => "e.g. 12-3456789",
            Self::ContactName => "e.g. John Doe",
            Self::Email => "e.g. john@acme.com",
            Self::Tier => "",
        }
    }

    /// Choice fields are toggled rather than typed into
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Tier)
    }
}

/// Onboarding service level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    #[default]
    Standard,
    Enterprise,
}

impl Tier {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Standard => Self::Enterprise,
            Self::Enterprise => Self::Standard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Enterprise => "Enterprise",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Automated KYC, Contract Gen & IT Setup",
            Self::Enterprise => "Dedicated onboarding with custom integrations",
        }
    }

    /// Workflow template requested from the API
    pub fn workflow_type(&self) -> &'static str {
        match self {
            Self::Standard => "standard_onboarding",
            Self::Enterprise => "enterprise_onboarding",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_defaults_to_standard() {
        assert_eq!(Tier::default(), Tier::Standard);
    }

    #[test]
    fn test_tier_toggle_round_trips() {
        assert_eq!(Tier::Standard.toggle(), Tier::Enterprise);
        assert_eq!(Tier::Enterprise.toggle(), Tier::Standard);
    }

    #[test]
    fn test_workflow_type_mapping() {
        assert_eq!(Tier::Standard.workflow_type(), "standard_onboarding");
        assert_eq!(Tier::Enterprise.workflow_type(), "enterprise_onboarding");
    }

    #[test]
    fn test_field_names_match_wire_keys() {
        assert_eq!(WizardField::CompanyName.name(), "company_name");
        assert_eq!(WizardField::Email.name(), "email");
    }

    #[test]
    fn test_only_tier_is_choice() {
        assert!(WizardField::Tier.is_choice());
        assert!(!WizardField::Email.is_choice());
    }
}
