use serde::Serialize;

/// Default action granted by an allow statement.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Policy language version stamped on every document.
pub const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// Authorization artifact returned for a verified bearer.
///
/// Serializes in the custom-authorizer response shape. A decision without a
/// policy document is read downstream as deny.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub principal_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_document: Option<PolicyDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: Vec<String>,
    pub effect: Effect,
    pub resource: Vec<String>,
}

impl AccessDecision {
    pub fn subject(&self) -> &str {
        &self.principal_id
    }

    /// Overall effect: `Allow` only when at least one statement exists and
    /// none of them denies.
    pub fn effect(&self) -> Effect {
        let statements = self
            .policy_document
            .as_ref()
            .map(|document| document.statement.as_slice())
            .unwrap_or_default();

        if !statements.is_empty()
            && statements
                .iter()
                .all(|statement| statement.effect == Effect::Allow)
        {
            Effect::Allow
        } else {
            Effect::Deny
        }
    }

    /// Resource of the first statement, if any.
    pub fn resource(&self) -> Option<&str> {
        self.policy_document
            .as_ref()
            .and_then(|document| document.statement.first())
            .and_then(|statement| statement.resource.first())
            .map(String::as_str)
    }

    pub fn is_allowed(&self) -> bool {
        self.effect() == Effect::Allow
    }
}

/// Builds access decisions for verified subjects.
///
/// There is no claim-based branching: a verified subject asking for a
/// resource is allowed. The statement is only attached when both subject
/// and resource are non-empty.
#[derive(Debug, Clone)]
pub struct AccessDecisionBuilder {
    action: String,
    version: String,
}

impl AccessDecisionBuilder {
    pub fn new() -> Self {
        Self {
            action: INVOKE_ACTION.to_string(),
            version: POLICY_VERSION.to_string(),
        }
    }

    /// Set the action granted by allow statements.
    pub fn with_action(mut self, action: impl ToString) -> Self {
        self.action = action.to_string();
        self
    }

    pub fn build(&self, subject: &str, resource: &str) -> AccessDecision {
        let policy_document = (!subject.is_empty() && !resource.is_empty()).then(|| {
            PolicyDocument {
                version: self.version.clone(),
                statement: vec![PolicyStatement {
                    action: vec![self.action.clone()],
                    effect: Effect::Allow,
                    resource: vec![resource.to_string()],
                }],
            }
        });

        AccessDecision {
            principal_id: subject.to_string(),
            policy_document,
        }
    }
}

impl Default for AccessDecisionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
