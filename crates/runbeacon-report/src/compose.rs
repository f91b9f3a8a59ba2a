//! Message composition: headline, fact table, and the wire payload.

use chrono::{DateTime, Local};
use serde::Serialize;

use runbeacon_config::DeliveryConfig;

use crate::context::RunContext;
use crate::facts::AttributeSet;

/// Placeholder token in the puppetboard URL template.
const FQDN_TOKEN: &str = ":fqdn";

/// Timestamp rendering, asctime-style: `Thu Aug 28 09:30:00 2026`.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Wire payload for a Slack incoming webhook.
///
/// Fields the config leaves unset serialize as JSON `null`; Slack falls back
/// to the webhook's own defaults for those.
#[derive(Debug, Clone, Serialize)]
pub struct SlackPayload {
    pub channel: Option<String>,
    pub username: Option<String>,
    pub icon_url: Option<String>,
    pub text: String,
}

impl SlackPayload {
    pub fn new(config: &DeliveryConfig, text: String) -> Self {
        Self {
            channel: config.channel.clone(),
            username: config.botname.clone(),
            icon_url: config.icon_url.clone(),
            text,
        }
    }
}

/// Compose the full message body: headline, blank line, fact table.
///
/// Pure in its inputs; the caller captures the timestamp so that composition
/// is reproducible under test.
pub fn compose_message(
    ctx: &RunContext,
    config: &DeliveryConfig,
    attrs: &AttributeSet,
    now: DateTime<Local>,
) -> String {
    let mut lines = vec![headline(ctx, config, now), String::new()];
    lines.extend(fact_table(attrs));
    lines.join("\n")
}

/// Render the status headline, with a puppetboard link when configured.
fn headline(ctx: &RunContext, config: &DeliveryConfig, now: DateTime<Local>) -> String {
    let stamp = now.format(TIMESTAMP_FORMAT);
    let body = match &config.puppetboard_url {
        Some(template) => {
            let link = template.replace(FQDN_TOKEN, &ctx.host);
            format!(
                "Puppet run for <{link}|{host}> {status} at {stamp}.",
                host = ctx.host,
                status = ctx.status,
            )
        }
        None => format!(
            "Puppet run by {host} {status} at {stamp}.",
            host = ctx.host,
            status = ctx.status,
        ),
    };

    let glyph = ctx.status.glyph();
    if glyph.is_empty() {
        body
    } else {
        format!("{glyph} {body}")
    }
}

/// Render the attribute table as three pipe-delimited markdown lines:
/// capitalized header, `---` separator, values.
fn fact_table(attrs: &AttributeSet) -> Vec<String> {
    let header = attrs
        .iter()
        .map(|(name, _)| capitalize(name))
        .collect::<Vec<_>>()
        .join(" | ");
    let separator = attrs
        .iter()
        .map(|_| "---")
        .collect::<Vec<_>>()
        .join(" | ");
    let values = attrs
        .iter()
        .map(|(_, value)| value)
        .collect::<Vec<_>>()
        .join(" | ");

    vec![
        format!("| {header} |"),
        format!("| {separator} |"),
        format!("| {values} |"),
    ]
}

/// Upper-case the first character, leave the rest unchanged.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunStatus;
    use chrono::TimeZone;

    fn ctx(status: RunStatus) -> RunContext {
        RunContext {
            host: "node1".to_string(),
            environment: "prod".to_string(),
            runmode: "agent".to_string(),
            noop: false,
            status,
        }
    }

    fn config(puppetboard_url: Option<&str>) -> DeliveryConfig {
        DeliveryConfig {
            webhook_url: "https://hooks.slack.com/services/T0/B0/XX".parse().unwrap(),
            channel: Some("#ops".to_string()),
            botname: Some("puppet".to_string()),
            icon_url: None,
            puppetboard_url: puppetboard_url.map(|s| s.to_string()),
        }
    }

    fn frozen_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 28, 9, 30, 0).unwrap()
    }

    fn attrs() -> AttributeSet {
        let mut attrs = AttributeSet::default();
        attrs.push("environment", "prod");
        attrs.push("runmode", "agent");
        attrs.push("noop", "false");
        attrs.push("tier", "*unknown*");
        attrs
    }

    #[test]
    fn each_known_status_carries_exactly_its_glyph() {
        let glyphs = [":sparkles:", ":no_entry:", ":white_check_mark:"];
        let statuses = [RunStatus::Changed, RunStatus::Failed, RunStatus::Unchanged];
        for (status, glyph) in statuses.into_iter().zip(glyphs) {
            let line = headline(&ctx(status), &config(None), frozen_now());
            assert!(line.starts_with(glyph), "{line}");
            for other in glyphs.iter().filter(|g| **g != glyph) {
                assert!(!line.contains(other), "{line}");
            }
        }
    }

    #[test]
    fn unknown_status_has_no_glyph_and_no_leading_space() {
        let line = headline(
            &ctx(RunStatus::Other("pending".to_string())),
            &config(None),
            frozen_now(),
        );
        assert!(line.starts_with("Puppet run by node1 pending at "), "{line}");
    }

    #[test]
    fn puppetboard_template_replaces_every_fqdn_token() {
        let line = headline(
            &ctx(RunStatus::Changed),
            &config(Some("http://dash/:fqdn?q=:fqdn")),
            frozen_now(),
        );
        assert!(line.contains("<http://dash/node1?q=node1|node1>"), "{line}");
        assert!(!line.contains(":fqdn"), "{line}");
    }

    #[test]
    fn plain_headline_uses_the_by_form() {
        let line = headline(&ctx(RunStatus::Failed), &config(None), frozen_now());
        assert_eq!(
            line,
            ":no_entry: Puppet run by node1 failed at Fri Aug 28 09:30:00 2026."
        );
    }

    #[test]
    fn table_is_three_lines_with_capitalized_header() {
        let table = fact_table(&attrs());
        assert_eq!(
            table,
            [
                "| Environment | Runmode | Noop | Tier |",
                "| --- | --- | --- | --- |",
                "| prod | agent | false | *unknown* |",
            ]
        );
    }

    #[test]
    fn message_is_headline_blank_line_then_table() {
        let message = compose_message(
            &ctx(RunStatus::Unchanged),
            &config(None),
            &attrs(),
            frozen_now(),
        );
        let lines: Vec<&str> = message.split('\n').collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with(":white_check_mark:"));
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("| Environment"));
    }

    #[test]
    fn composition_is_stable_for_identical_inputs() {
        let a = compose_message(
            &ctx(RunStatus::Changed),
            &config(Some("http://dash/:fqdn")),
            &attrs(),
            frozen_now(),
        );
        let b = compose_message(
            &ctx(RunStatus::Changed),
            &config(Some("http://dash/:fqdn")),
            &attrs(),
            frozen_now(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn unset_config_fields_serialize_as_null() {
        let payload = SlackPayload::new(
            &DeliveryConfig {
                webhook_url: "https://hooks.slack.com/services/T0/B0/XX".parse().unwrap(),
                channel: None,
                botname: None,
                icon_url: None,
                puppetboard_url: None,
            },
            "hello".to_string(),
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "channel": null,
                "username": null,
                "icon_url": null,
                "text": "hello",
            })
        );
    }
}
