use super::{Rule, finding};
use crate::model::Statement;
use polguard_types::{Finding, Risk, ids};

/// `Allow` with a service-wide wildcard such as `"s3:*"`.
///
/// One finding per matching entry. `Action` is a sorted set, so emission order is stable.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceWildcardRule;

impl Rule for ServiceWildcardRule {
    fn id(&self) -> &'static str {
        ids::RULE_SERVICE_WILDCARD
    }

    fn risk(&self) -> Risk {
        Risk::Medium
    }

    fn evaluate(&self, index: usize, statement: &Statement, out: &mut Vec<Finding>) {
        if !statement.is_allow() {
            return;
        }
        for action in &statement.action {
            if let Some(service) = service_of_wildcard(action) {
                out.push(finding(
                    self,
                    index,
                    format!("Statement grants all `{service}` actions (`{action}`)"),
                ));
            }
        }
    }
}

/// `"s3:*"` -> `Some("s3")`. Prefix wildcards like `"s3:Get*"` and the bare `"*"` are not
/// service-wide.
fn service_of_wildcard(action: &str) -> Option<&str> {
    let (service, rest) = action.split_once(':')?;
    if rest == ids::WILDCARD && !service.is_empty() && !service.contains('*') {
        Some(service)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::service_of_wildcard;

    #[test]
    fn recognizes_only_service_wide_wildcards() {
        assert_eq!(service_of_wildcard("s3:*"), Some("s3"));
        assert_eq!(service_of_wildcard("iam:*"), Some("iam"));
        assert_eq!(service_of_wildcard("*"), None);
        assert_eq!(service_of_wildcard("s3:Get*"), None);
        assert_eq!(service_of_wildcard(":*"), None);
        assert_eq!(service_of_wildcard("*:*"), None);
        assert_eq!(service_of_wildcard("s3:GetObject"), None);
    }
}
