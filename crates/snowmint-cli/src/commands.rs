use crate::config::{Action, AppConfig, Format, Width};
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use snowmint::{RadixExt, SnowflakeGenerator, SnowflakeId, TimeSource};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Runs the configured action, writing its results to `out`.
pub fn run<T, W>(
    config: &AppConfig,
    generator: &SnowflakeGenerator<T>,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: TimeSource,
    W: Write,
{
    let max_node_id = config.width().max_node_id();
    if matches!(config.action, Action::Generate { .. }) && generator.node_id() > max_node_id {
        tracing::warn!(
            node_id = generator.node_id(),
            max_node_id,
            "node ID does not fit the node field and will be truncated"
        );
    }

    match &config.action {
        Action::Generate {
            count,
            width,
            format,
            unpadded,
        } => generate(generator, *count, *width, *format, *unpadded, out),
        Action::Extract { id, width, format } => {
            let time = extract(generator, id, *width, *format)?;
            writeln!(out, "{}", render_time(time)?)?;
            Ok(())
        }
    }
}

fn generate<T, W>(
    generator: &SnowflakeGenerator<T>,
    count: usize,
    width: Width,
    format: Format,
    unpadded: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: TimeSource,
    W: Write,
{
    for _ in 0..count {
        let line = match width {
            Width::Bits64 => render_id(&generator.next_compact(), format, unpadded),
            Width::Bits128 => render_id(&generator.next_extended(), format, unpadded),
        };
        writeln!(out, "{line}")?;
    }
    tracing::debug!(count, ?width, ?format, "generated identifiers");
    Ok(())
}

fn render_id<ID>(id: &ID, format: Format, unpadded: bool) -> String
where
    ID: SnowflakeId,
{
    match format.radix() {
        None => id.to_string(),
        Some(radix) if unpadded => id.encode_unpadded(radix),
        Some(radix) => id.encode(radix),
    }
}

fn extract<T>(
    generator: &SnowflakeGenerator<T>,
    id: &str,
    width: Width,
    format: Format,
) -> anyhow::Result<SystemTime>
where
    T: TimeSource,
{
    let time = match (format.radix(), width) {
        (None, Width::Bits64) => {
            let raw = id
                .parse::<u64>()
                .with_context(|| format!("`{id}` is not a decimal 64-bit ID"))?;
            generator.extract_time_64(raw)
        }
        (None, Width::Bits128) => {
            let raw = id
                .parse::<u128>()
                .with_context(|| format!("`{id}` is not a decimal 128-bit ID"))?;
            generator.extract_time_128(raw)
        }
        (Some(radix), Width::Bits64) => generator
            .extract_time_64_str(id, radix)
            .with_context(|| format!("`{id}` is not a {radix} 64-bit ID"))?,
        (Some(radix), Width::Bits128) => generator
            .extract_time_128_str(id, radix)
            .with_context(|| format!("`{id}` is not a {radix} 128-bit ID"))?,
    };
    Ok(time)
}

/// Formats `time` as `<RFC 3339 UTC> <Unix milliseconds>`.
fn render_time(time: SystemTime) -> anyhow::Result<String> {
    let millis = time
        .duration_since(UNIX_EPOCH)
        .context("instant is before the Unix epoch")?
        .as_millis();
    let rfc3339 = i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .with_context(|| format!("instant {millis} ms after the Unix epoch is out of range"))?
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    Ok(format!("{rfc3339} {millis}"))
}
