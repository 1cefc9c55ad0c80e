//! Wizard submission: form values → wizard request → where to go next

use super::error::ApiError;
use super::traits::OnboardingApi;
use super::types::{WizardContext, WizardRequest};
use crate::state::WizardFormData;

/// Origin tag recorded in the workflow context
const INTAKE_SOURCE: &str = "tui_wizard";

/// Priority for wizard-created workflows
const WIZARD_PRIORITY: &str = "normal";

/// Where the console goes after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Detail view of the workflow that was just created
    WorkflowDetail(String),
    /// Workflow list, used when the API did not say what it created
    WorkflowList,
}

/// Map wizard values onto the API's field names
pub fn build_request(data: &WizardFormData) -> WizardRequest {
    WizardRequest {
        company_name: data.company_name.trim().to_string(),
        tax_id: data.tax_id.trim().to_string(),
        contact_name: data.contact_name.trim().to_string(),
        email: data.email.trim().to_string(),
        workflow_type: data.tier.workflow_type().to_string(),
        priority: WIZARD_PRIORITY.to_string(),
        context: WizardContext {
            intake_source: INTAKE_SOURCE.to_string(),
        },
    }
}

/// Id of the created workflow at `data.id`, string or number
pub(crate) fn created_id(body: &serde_json::Value) -> Option<String> {
    match body.pointer("/data/id")? {
        serde_json::Value::String(id) if !id.is_empty() => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Submit the wizard once. No retry; the caller re-enables the form on error.
pub async fn submit_wizard(
    api: &dyn OnboardingApi,
    data: &WizardFormData,
) -> Result<NavTarget, ApiError> {
    let request = build_request(data);
    tracing::info!(
        workflow_type = %request.workflow_type,
        "Submitting onboarding wizard"
    );

    match api.create_onboarding(&request).await {
        Ok(Some(id)) => {
            tracing::info!(workflow_id = %id, "Onboarding workflow created");
            Ok(NavTarget::WorkflowDetail(id))
        }
        Ok(None) => {
            tracing::warn!("Onboarding created but response carried no workflow id");
            Ok(NavTarget::WorkflowList)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to start onboarding");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockOnboardingApi;
    use crate::state::Tier;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_data(tier: Tier) -> WizardFormData {
        WizardFormData {
            company_name: "Acme Corp".to_string(),
            tax_id: "12-3456789".to_string(),
            contact_name: "John Doe".to_string(),
            email: "john@acme.com".to_string(),
            tier,
        }
    }

    #[test]
    fn test_build_request_standard() {
        let request = build_request(&valid_data(Tier::Standard));
        assert_eq!(request.company_name, "Acme Corp");
        assert_eq!(request.tax_id, "12-3456789");
        assert_eq!(request.contact_name, "John Doe");
        assert_eq!(request.email, "john@acme.com");
        assert_eq!(request.workflow_type, "standard_onboarding");
        assert_eq!(request.priority, "normal");
        assert_eq!(request.context.intake_source, "tui_wizard");
    }

    #[test]
    fn test_build_request_enterprise() {
        let request = build_request(&valid_data(Tier::Enterprise));
        assert_eq!(request.workflow_type, "enterprise_onboarding");
    }

    #[test]
    fn test_request_wire_shape() {
        let value = serde_json::to_value(build_request(&valid_data(Tier::Standard))).unwrap();
        assert_eq!(
            value,
            json!({
                "company_name": "Acme Corp",
                "tax_id": "12-3456789",
                "contact_name": "John Doe",
                "email": "john@acme.com",
                "workflow_type": "standard_onboarding",
                "priority": "normal",
                "context": {"intake_source": "tui_wizard"}
            })
        );
    }

    #[test]
    fn test_created_id_paths() {
        assert_eq!(
            created_id(&json!({"data": {"id": "wf_123"}})),
            Some("wf_123".to_string())
        );
        assert_eq!(created_id(&json!({"data": {"id": 42}})), Some("42".to_string()));
        assert_eq!(created_id(&json!({"data": {"id": ""}})), None);
        assert_eq!(created_id(&json!({"data": {}})), None);
        assert_eq!(created_id(&json!({"id": "wf_123"})), None);
        assert_eq!(created_id(&json!([])), None);
    }

    #[tokio::test]
    async fn test_success_with_id_targets_detail() {
        let mut api = MockOnboardingApi::new();
        api.expect_create_onboarding()
            .times(1)
            .withf(|req| req.workflow_type == "standard_onboarding" && req.priority == "normal")
            .returning(|_| Ok(Some("wf_123".to_string())));

        let target = submit_wizard(&api, &valid_data(Tier::Standard)).await.unwrap();
        assert_eq!(target, NavTarget::WorkflowDetail("wf_123".to_string()));
    }

    #[tokio::test]
    async fn test_success_without_id_targets_list() {
        let mut api = MockOnboardingApi::new();
        api.expect_create_onboarding()
            .times(1)
            .returning(|_| Ok(None));

        let target = submit_wizard(&api, &valid_data(Tier::Enterprise)).await.unwrap();
        assert_eq!(target, NavTarget::WorkflowList);
    }

    #[tokio::test]
    async fn test_failure_is_returned_without_retry() {
        let mut api = MockOnboardingApi::new();
        api.expect_create_onboarding()
            .times(1)
            .returning(|_| Err(ApiError::Unavailable));

        let result = submit_wizard(&api, &valid_data(Tier::Standard)).await;
        assert!(matches!(result, Err(ApiError::Unavailable)));
    }
}
