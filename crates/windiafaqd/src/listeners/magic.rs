//! `magic`: magic needed to one-shot a monster.

use crate::calculator::{
    ADVANTAGE_MULTIPLIER, BW_AMP_MULTIPLIER, DISADVANTAGE_MULTIPLIER, Element,
    FP_IL_AMP_MULTIPLIER, MagicFlags, STAFF_MULTIPLIER, magic_required,
};
use crate::dispatch::{Command, CommandListener, Embed, EmbedField, HandlerError, ReturnData};

use super::format::number;

#[derive(Debug, Default)]
pub struct MagicListener;

impl CommandListener for MagicListener {
    fn run(&self, command: &Command) -> Result<ReturnData, HandlerError> {
        let args = command.args();
        let hp = args.float_at(0)?;
        let spell_attack = args.float_at(1)?;
        let flags: MagicFlags = args.string_at(2)?.parse()?;
        let estimate = magic_required(hp, spell_attack, flags)?;

        let embed = Embed::new("Magic Calculator", describe(hp, spell_attack, flags))
            .with_field(EmbedField::inline("Class", "BW\nFP/IL\nBS"))
            .with_field(EmbedField::inline(
                "Magic",
                format!(
                    "{}\n{}\n{}",
                    number(estimate.bw),
                    number(estimate.fp_il),
                    number(estimate.bs)
                ),
            ));
        Ok(ReturnData::embeds(vec![embed]))
    }
}

fn describe(hp: f64, spell_attack: f64, flags: MagicFlags) -> String {
    let mut description = format!(
        "The magic required to one-shot a monster with {} HP and {} spell attack with modifiers:\n\n\
         BW Elemental Amp: {}x\nFP/IL Elemental Amp: {}x\n",
        number(hp),
        number(spell_attack),
        number(BW_AMP_MULTIPLIER),
        number(FP_IL_AMP_MULTIPLIER),
    );
    match flags.element {
        Element::Advantage => description.push_str(&format!(
            "Elemental Advantage: {}x\n",
            number(ADVANTAGE_MULTIPLIER)
        )),
        Element::Disadvantage => description.push_str(&format!(
            "Elemental Disadvantage: {}x\n",
            number(DISADVANTAGE_MULTIPLIER)
        )),
        Element::Neutral => {}
    }
    if flags.staff {
        description.push_str(&format!("Staff Multiplier: {}x\n", number(STAFF_MULTIPLIER)));
    }
    description
}
