//! `flame`: flame stat ranges for an item level.

use crate::calculator::{FlameStats, StatRange};
use crate::dispatch::{Command, CommandListener, Embed, EmbedField, HandlerError, ReturnData};

use super::format::number;

#[derive(Debug, Default)]
pub struct FlameListener;

impl CommandListener for FlameListener {
    fn run(&self, command: &Command) -> Result<ReturnData, HandlerError> {
        let level = command.args().float_at(0)?;
        let stats = FlameStats::for_level(level)?;

        let embed = Embed::new(
            "Flames Calculator",
            format!(
                "The flame stats for a level {} item. Overall stats are double that of normal items.",
                number(stats.level)
            ),
        )
        .with_field(EmbedField::inline(
            "Eternal Flame Stat Range",
            ranges(stats.overall_eternal(), stats.eternal),
        ))
        .with_field(EmbedField::inline(
            "Powerful Flame Stat Range",
            ranges(stats.overall_powerful(), stats.powerful),
        ));
        Ok(ReturnData::embeds(vec![embed]))
    }
}

fn ranges(overall: StatRange, item: StatRange) -> String {
    format!(
        "Overall: {} - {}\nNot Overall: {} - {}",
        number(overall.min),
        number(overall.max),
        number(item.min),
        number(item.max)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Arg;

    #[test]
    fn reports_both_flame_kinds() {
        let reply = FlameListener
            .run(&Command::new("flame", vec![Arg::from(160.0)]))
            .expect("flame reply");

        assert!(reply.content.is_none());
        let embed = &reply.embeds[0];
        assert_eq!(embed.title, "Flames Calculator");
        assert!(embed.description.contains("level 160 item"));
        assert_eq!(
            embed.fields,
            [
                EmbedField::inline(
                    "Eternal Flame Stat Range",
                    "Overall: 72 - 180\nNot Overall: 36 - 90"
                ),
                EmbedField::inline(
                    "Powerful Flame Stat Range",
                    "Overall: 18 - 126\nNot Overall: 9 - 63"
                ),
            ]
        );
    }

    #[test]
    fn negative_levels_are_rejected() {
        let error = FlameListener
            .run(&Command::new("flame", vec![Arg::from(-5.0)]))
            .expect_err("invalid level");
        assert!(matches!(error, HandlerError::InvalidInput { .. }));
    }

    #[test]
    fn string_level_is_a_type_error() {
        let error = FlameListener
            .run(&Command::new("flame", vec![Arg::from("160")]))
            .expect_err("wrong kind");
        assert!(matches!(error, HandlerError::Argument(_)));
    }
}
