pub mod decision;

pub use decision::AccessDecision;
pub use decision::AccessDecisionBuilder;
pub use decision::Effect;
pub use decision::PolicyDocument;
pub use decision::PolicyStatement;
