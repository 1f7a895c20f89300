//! Plain-text board report.
//!
//! [`render`] is a pure function of a [`BoardState`] snapshot. The report is
//! meant to be pasted into a chat or forum post, optionally followed by a
//! fixed analysis request.

use std::fmt::Write;

use crate::models::Zone;
use crate::state::BoardState;

pub const EMPTY_BOARD: &str = "Board state is empty.";

const PROMPT_SEPARATOR: &str = "\n--------------------------------------------------\n";

const ANALYSIS_HEADER: &str = "**AI Analysis Request:**\n\
Based on the Magic: The Gathering board state provided above, please analyze the situation and provide the following:\n\n";

const STACK_URGENT_POINT: &str = "0. **URGENT - Stack Resolution:** There are spells or abilities on the stack. Before anything else, explain how the stack resolves (top item first), whether I should respond, and with what.\n";

const ANALYSIS_POINTS: &str = "\
1. **Best Lines of Play:** Identify the 2 best lines of play available right now and for the next turn.\n\
2. **Goal & Strategy:** Explain the specific goal of each line (e.g., lethal damage, board control, value engine) and how it advances the game state.\n\
3. **Combos & Synergies:** Highlight any specific card interactions, combos, or strong synergies present in the hand/board/graveyard.\n\
4. **Recommendation:** Which line offers the best optimal outcome and why?\n";

const STACK_ANALYSIS: &str = "**Stack Resolution Request:**\n\
Based on the Magic: The Gathering stack provided above (the last item listed is on top and resolves first), please provide the following:\n\n\
1. **Resolution Order:** Walk through how each item resolves, from the top of the stack down.\n\
2. **Responses:** Point out any moment where a player can or should respond, and what the best response is.\n\
3. **Final State:** Describe the board once the stack is empty.\n";

/// Output switches for [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prepend the pasted decklist (skipped when it is a URL).
    pub include_decklist: bool,
    /// Append the analysis request template.
    pub add_analysis_prompt: bool,
    /// Report only the stack.
    pub stack_solver_only: bool,
}

/// Render the board report for a state snapshot.
pub fn render(state: &BoardState, options: &RenderOptions) -> String {
    if options.stack_solver_only {
        return render_stack_solver(state, options);
    }

    // `write!` into a String cannot fail.
    let mut text = String::new();

    if options.include_decklist {
        let deck = state.decklist.trim();
        if !deck.is_empty() && !deck.starts_with("http") {
            let _ = write!(
                text,
                "--- FULL DECKLIST ---\n{}\n----------------------\n\n",
                deck
            );
        }
    }

    let life_line = format!("Current Life: {}", state.life);
    text.push_str(&life_line);
    text.push('\n');

    for row in state.commanders() {
        let name = row.name.trim();
        if !name.is_empty() {
            let _ = writeln!(
                text,
                "Commander: {} ({}, Tax: {})",
                name,
                row.location(),
                row.tax
            );
        }
    }
    text.push('\n');

    if !state.mana.is_empty() {
        let mana = state
            .mana
            .floating()
            .map(|(color, amount)| format!("{} {}", amount, color.letter()))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(text, "Floating Mana: {}\n\n", mana);
    }

    for zone in Zone::REPORT_ORDER {
        text.push_str(&zone_section(state, zone));
    }

    if !state.tokens().is_empty() {
        let _ = writeln!(text, "Tokens ({} types):", state.tokens().len());
        for token in state.tokens() {
            let _ = writeln!(text, "- {}x {}", token.count, token.name);
        }
        text.push('\n');
    }

    let opponent = state.opponent_board.trim();
    if opponent.eq_ignore_ascii_case("empty") {
        text.push_str("Opponent's Board: (Empty)\n");
    } else if !opponent.is_empty() {
        let _ = writeln!(text, "Opponent's Board:\n{}", opponent);
    }

    if text.trim() == life_line {
        return EMPTY_BOARD.to_string();
    }

    if options.add_analysis_prompt {
        text.push_str(PROMPT_SEPARATOR);
        text.push_str(ANALYSIS_HEADER);
        if !state.zone(Zone::Stack).is_empty() {
            text.push_str(STACK_URGENT_POINT);
        }
        text.push_str(ANALYSIS_POINTS);
    }

    text.trim().to_string()
}

/// `<Title> (<count>):` followed by one line per entry, or nothing for an
/// empty zone.
fn zone_section(state: &BoardState, zone: Zone) -> String {
    let cards = state.zone(zone);
    if cards.is_empty() {
        return String::new();
    }

    let mut section = format!("{} ({}):\n", zone.title(), state.zone_count(zone));
    for entry in cards {
        section.push_str(&entry.report_line());
        section.push('\n');
    }
    section.push('\n');
    section
}

fn render_stack_solver(state: &BoardState, options: &RenderOptions) -> String {
    let stack = state.zone(Zone::Stack);
    let mut text = String::from("--- STACK SOLVER ---\n");
    let _ = writeln!(
        text,
        "Current Stack (Top is last added) ({}):",
        state.zone_count(Zone::Stack)
    );

    if stack.is_empty() {
        text.push_str("(Empty)\n");
    } else {
        for entry in stack {
            text.push_str(&entry.report_line());
            text.push('\n');
        }
    }

    if options.add_analysis_prompt {
        text.push_str(PROMPT_SEPARATOR);
        text.push_str(STACK_ANALYSIS);
    }

    text.trim().to_string()
}
