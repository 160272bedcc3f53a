use serde_json::Value;

use crate::models::{Embed, EntryAlert, EodAlert, OutboundMessage, StopLossAlert, TakeProfitAlert};

pub const COLOR_GREEN: u32 = 0x00FF00;
pub const COLOR_RED: u32 = 0xFF0000;

fn direction_color(direction: &str) -> u32 {
    if direction == "LONG" {
        COLOR_GREEN
    } else {
        COLOR_RED
    }
}

/// Two decimals with comma thousands grouping, e.g. 4500.25 -> "4,500.25".
pub fn thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac_part}")
}

pub fn entry(alert: &EntryAlert) -> OutboundMessage {
    let emoji = if alert.direction == "LONG" { "🟢" } else { "🔴" };
    let risk = alert.risk();

    let mut embed = Embed::new(
        format!(
            "{} {} ENTRY - {} [{}]",
            emoji, alert.direction, alert.mode, alert.timeframe
        ),
        direction_color(&alert.direction),
    )
    .field("📍 Entry", format!("**{}**", thousands(alert.entry)), true)
    .field(
        "🛑 Stop Loss",
        format!("{}\n({:+.2} pts)", thousands(alert.stop), risk),
        true,
    )
    .field("📊 Risk", format!("**{:.2}** pts", risk), true)
    .field(
        "🎯 TP1 (1.3R)",
        format!("{}\n({:+.2} pts)", thousands(alert.tp1), alert.tp1_dist()),
        true,
    )
    .field(
        "🎯 TP2 (2.0R)",
        format!("{}\n({:+.2} pts)", thousands(alert.tp2), alert.tp2_dist()),
        true,
    )
    .field("⏰ Time", format!("{}\n{}", alert.time, alert.day), true);

    if let Some(mo_bias) = &alert.mo_bias {
        embed = embed.field("🌙 Midnight Open", mo_bias.clone(), false);
    }

    let embed = embed.footer(format!(
        "ICT Pro v10 Optimized | {} Chart | Trade at your own risk",
        alert.timeframe
    ));

    OutboundMessage::embed(embed)
}

pub fn tp1(alert: &TakeProfitAlert) -> OutboundMessage {
    let embed = Embed::new("✅ TP1 HIT - 50% Closed", direction_color(&alert.direction))
        .description(format!("**{}** position moved to breakeven", alert.direction))
        .field("💰 TP1 Price", thousands(alert.price), true)
        .field("📈 Profit", format!("+{:.2} pts", alert.profit), true)
        .field("🔒 Status", "Breakeven Active", true)
        .footer("Remaining 50% running to TP2");

    OutboundMessage::embed(embed)
}

pub fn tp2(alert: &TakeProfitAlert) -> OutboundMessage {
    let embed = Embed::new("🎯 TP2 HIT - Trade Complete", COLOR_GREEN)
        .description(format!("**{}** position fully closed", alert.direction))
        .field("💰 TP2 Price", thousands(alert.price), true)
        .field("📈 Total Profit", format!("+{:.2} pts", alert.profit), true)
        .field("✅ Result", "WINNER", true);

    OutboundMessage::embed(embed)
}

pub fn sl(alert: &StopLossAlert) -> OutboundMessage {
    let embed = Embed::new("🛑 STOP LOSS HIT", COLOR_RED)
        .description(format!("**{}** position closed at stop", alert.direction))
        .field("💰 Exit Price", thousands(alert.price), true)
        .field("📉 Loss", format!("{:.2} pts", alert.loss), true)
        .field("❌ Result", "STOPPED OUT", true);

    OutboundMessage::embed(embed)
}

pub fn eod(alert: &EodAlert) -> OutboundMessage {
    // pnl == 0 renders BREAKEVEN text with the red color, on purpose.
    let color = if alert.pnl > 0.0 { COLOR_GREEN } else { COLOR_RED };

    let embed = Embed::new("🌅 EOD CLOSE (3:00 PM)", color)
        .description(format!("**{}** position closed at end of day", alert.direction))
        .field("💰 Exit Price", thousands(alert.price), true)
        .field("📊 P&L", format!("{:+.2} pts", alert.pnl), true)
        .field("📋 Result", alert.result(), true);

    OutboundMessage::embed(embed)
}

/// Fallback for unrecognized alert types: the whole payload, pretty-printed.
pub fn generic(payload: &Value) -> OutboundMessage {
    let rendered =
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    OutboundMessage::text(format!("📢 Alert: {}", rendered))
}
