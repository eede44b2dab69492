//! # Instance Information Page
//!
//! Renders the landing page with the container hostname and, when the
//! service runs on EC2, the instance ID and availability zone fetched from
//! the instance metadata service. A failed lookup degrades to placeholder
//! values; this endpoint never answers with an error status.

use axum::extract::State;
use axum::response::Html;
use tracing::debug;

use crate::web::state::AppState;

/// Placeholder shown when the metadata service cannot be reached
pub const METADATA_UNAVAILABLE: &str = "N/A (not on EC2)";

/// Identity facts rendered on the landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    pub hostname: String,
    pub instance_id: String,
    pub availability_zone: String,
}

/// Landing page: GET /
///
/// Gathers the hostname and instance identity fresh on every request and
/// renders them into the info page.
pub async fn home(State(state): State<AppState>) -> Html<String> {
    let hostname = super::local_hostname();

    let (instance_id, availability_zone) = match state.metadata.fetch_identity().await {
        Ok(identity) => (identity.instance_id, identity.availability_zone),
        Err(error) => {
            debug!(error = %error, "instance metadata unavailable, rendering placeholders");
            (
                METADATA_UNAVAILABLE.to_string(),
                METADATA_UNAVAILABLE.to_string(),
            )
        }
    };

    let info = InstanceInfo {
        hostname,
        instance_id,
        availability_zone,
    };
    Html(render_page(&info))
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Terraform + Docker Web Server</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            max-width: 800px;
            margin: 50px auto;
            padding: 20px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
        }
        .container {
            background: rgba(255, 255, 255, 0.1);
            padding: 30px;
            border-radius: 10px;
            backdrop-filter: blur(10px);
        }
        h1 {
            margin-top: 0;
        }
        .info {
            background: rgba(0, 0, 0, 0.2);
            padding: 15px;
            border-radius: 5px;
            margin: 10px 0;
        }
        code {
            background: rgba(0, 0, 0, 0.3);
            padding: 2px 6px;
            border-radius: 3px;
        }
        .badge {
            display: inline-block;
            padding: 5px 10px;
            border-radius: 5px;
            margin: 5px 5px 5px 0;
        }
        .terraform-badge {
            background: #7B42BC;
        }
        .docker-badge {
            background: #2496ED;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>🚀 Hello from Terraform + Docker!</h1>
        <p>This containerized application is running on infrastructure provisioned entirely through code.</p>

        <div class="info">
            <h3>Instance Information:</h3>
            <p><strong>Container Hostname:</strong> <code>{hostname}</code></p>
            <p><strong>Instance ID:</strong> <code>{instance_id}</code></p>
            <p><strong>Availability Zone:</strong> <code>{availability_zone}</code></p>
        </div>

        <div>
            <span class="badge terraform-badge">⚡ Provisioned with Terraform</span>
            <span class="badge docker-badge">🐳 Running in Docker</span>
        </div>

        <p>This entire infrastructure - ECR repository, EC2 instance, security group, and container orchestration - was created from declarative configuration files. No clicking required!</p>
    </div>
</body>
</html>
"#;

/// Render the info page with all interpolated values HTML-escaped.
///
/// The values come from the local OS and the metadata service, but they are
/// escaped anyway so a hostile hostname can never break out of the markup.
fn render_page(info: &InstanceInfo) -> String {
    PAGE_TEMPLATE
        .replace("{hostname}", &escape_html(&info.hostname))
        .replace("{instance_id}", &escape_html(&info.instance_id))
        .replace("{availability_zone}", &escape_html(&info.availability_zone))
}

/// Minimal HTML escaping for text interpolated into the page.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_info() -> InstanceInfo {
        InstanceInfo {
            hostname: "web-1".to_string(),
            instance_id: "i-0123456789abcdef0".to_string(),
            availability_zone: "us-east-1a".to_string(),
        }
    }

    #[test]
    fn test_render_interpolates_all_fields() {
        let page = render_page(&sample_info());
        assert!(page.contains("<code>web-1</code>"));
        assert!(page.contains("<code>i-0123456789abcdef0</code>"));
        assert!(page.contains("<code>us-east-1a</code>"));
    }

    #[test]
    fn test_render_leaves_no_placeholders() {
        let page = render_page(&sample_info());
        assert!(!page.contains("{hostname}"));
        assert!(!page.contains("{instance_id}"));
        assert!(!page.contains("{availability_zone}"));
    }

    #[test]
    fn test_render_with_sentinel_values() {
        let info = InstanceInfo {
            hostname: "web-1".to_string(),
            instance_id: METADATA_UNAVAILABLE.to_string(),
            availability_zone: METADATA_UNAVAILABLE.to_string(),
        };
        let page = render_page(&info);
        assert_eq!(page.matches("<code>N/A (not on EC2)</code>").count(), 2);
    }

    #[test]
    fn test_render_escapes_markup_in_values() {
        let info = InstanceInfo {
            hostname: "<script>alert(1)</script>".to_string(),
            instance_id: "i-abc".to_string(),
            availability_zone: "us-east-1a".to_string(),
        };
        let page = render_page(&info);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_escape_html_basic_entities() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"x\"='y'"), "&quot;x&quot;=&#39;y&#39;");
        assert_eq!(escape_html("plain-host-01"), "plain-host-01");
    }

    fn unescape_html(value: &str) -> String {
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    proptest! {
        #[test]
        fn prop_escape_html_removes_markup_characters(value in ".*") {
            let escaped = escape_html(&value);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
        }

        #[test]
        fn prop_escape_html_roundtrips(value in ".*") {
            prop_assert_eq!(unescape_html(&escape_html(&value)), value);
        }
    }
}
