//! Mnemonic assignment: give every command in a bucket a unique next key.
//!
//! Each command contributes a *preferred* pool (initials of its name and id)
//! and a *fallback* pool (the rest of the first word of its name). Symbols
//! are ranked into a single ordered set shared by the whole bucket:
//!
//! 1. preferred symbols, rarest first, each followed by its uppercase form;
//! 2. fallback symbols, most common first, same interleaving.
//!
//! Two passes then walk that set. The first matches symbols against the
//! preferred pools, the second hands whatever is left to the fallback pools.
//! A symbol is matched case-insensitively but bound with its exact case, so
//! `t` and `T` are distinct bindings that both satisfy a pool containing `t`.

use std::cmp::Reverse;

use indexmap::{IndexMap, IndexSet};

use crate::command::Command;
use crate::key::{format_sequence, KeyCode};
use crate::letters::{id_first_letters, name_first_letters, name_remaining_letters};

/// Symbols still free in the bucket being assigned, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemainingSymbols(IndexSet<char>);

impl RemainingSymbols {
    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    /// Take a symbol out of the pool, preserving the order of the rest.
    pub fn remove(&mut self, symbol: char) -> bool {
        self.0.shift_remove(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<char> for RemainingSymbols {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn lowercase(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn uppercase(ch: char) -> char {
    ch.to_uppercase().next().unwrap_or(ch)
}

/// Count how many pools each symbol appears in, in first-seen order.
fn tally(pools: &[IndexSet<char>]) -> IndexMap<char, usize> {
    let mut counts = IndexMap::new();
    for symbol in pools.iter().flatten() {
        *counts.entry(*symbol).or_insert(0) += 1;
    }
    counts
}

/// Rank symbols by frequency and interleave uppercase variants.
///
/// The sort is stable, so symbols with equal counts keep first-seen order.
fn ranked(counts: &IndexMap<char, usize>, rarest_first: bool) -> Vec<char> {
    let mut entries: Vec<(char, usize)> = counts.iter().map(|(&ch, &n)| (ch, n)).collect();
    if rarest_first {
        entries.sort_by_key(|&(_, n)| n);
    } else {
        entries.sort_by_key(|&(_, n)| Reverse(n));
    }
    entries
        .into_iter()
        .flat_map(|(ch, _)| [ch, uppercase(ch)])
        .collect()
}

/// Build the shared, de-duplicated candidate set for a bucket.
#[must_use]
pub fn candidate_symbols(
    preferred: &IndexMap<char, usize>,
    fallback: &IndexMap<char, usize>,
) -> RemainingSymbols {
    ranked(preferred, true)
        .into_iter()
        .chain(ranked(fallback, false))
        .collect()
}

/// One assignment pass over the shared pool.
///
/// For each symbol, in order, the first command without a prefix whose pool
/// holds the symbol (ignoring case) receives `parent ++ [symbol]`. Consumed
/// symbols are removed; the residual pool is returned for the next pass.
#[must_use]
pub fn assign_pass(
    parent: &[KeyCode],
    commands: &mut [Command],
    pools: &[IndexSet<char>],
    mut remaining: RemainingSymbols,
) -> RemainingSymbols {
    let symbols: Vec<char> = remaining.iter().collect();
    for symbol in symbols {
        let wanted = lowercase(symbol);
        let Some(index) = commands
            .iter()
            .zip(pools)
            .position(|(command, pool)| command.prefix.is_none() && pool.contains(&wanted))
        else {
            continue;
        };

        let mut prefix = parent.to_vec();
        prefix.push(KeyCode::Char(symbol));
        commands[index].prefix = Some(prefix);
        remaining.remove(symbol);
    }
    remaining
}

/// Result of running assignment over one bucket.
#[derive(Debug, Clone)]
pub struct Assignment {
    commands: Vec<Command>,
    leftover: RemainingSymbols,
}

impl Assignment {
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Commands that ended up with a sequence, paired with it.
    pub fn assigned(&self) -> impl Iterator<Item = (&Command, &[KeyCode])> {
        self.commands
            .iter()
            .filter_map(|command| command.prefix.as_deref().map(|prefix| (command, prefix)))
    }

    /// Symbols neither pass handed out.
    ///
    /// Unassigned commands with symbols still left ran out of compatible
    /// letters rather than out of keys.
    #[must_use]
    pub fn leftover(&self) -> &RemainingSymbols {
        &self.leftover
    }

    /// Commands no free symbol could be found for.
    pub fn unassigned(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(|command| command.prefix.is_none())
    }
}

/// Assign each unprefixed command in `commands` a key under `parent`.
///
/// Commands that already carry a prefix are left as they are, and if that
/// prefix is a direct child of `parent` its last symbol is reserved so no
/// other command can land on the same sequence.
#[must_use]
pub fn determine_prefixes(parent: &[KeyCode], mut commands: Vec<Command>) -> Assignment {
    let preferred: Vec<IndexSet<char>> = commands
        .iter()
        .map(|command| {
            name_first_letters(&command.name)
                .into_iter()
                .chain(id_first_letters(&command.id))
                .collect()
        })
        .collect();
    let fallback: Vec<IndexSet<char>> = commands
        .iter()
        .map(|command| name_remaining_letters(&command.name).into_iter().collect())
        .collect();

    let mut remaining = candidate_symbols(&tally(&preferred), &tally(&fallback));
    for prefix in commands.iter().filter_map(|command| command.prefix.as_deref()) {
        if let Some((KeyCode::Char(taken), head)) = prefix.split_last() {
            if head == parent {
                remaining.remove(*taken);
            }
        }
    }
    log::trace!(
        "candidate symbols under [{}]: {:?}",
        format_sequence(parent),
        remaining.iter().collect::<String>()
    );

    let remaining = assign_pass(parent, &mut commands, &preferred, remaining);
    let leftover = assign_pass(parent, &mut commands, &fallback, remaining);

    let assignment = Assignment { commands, leftover };
    for command in assignment.unassigned() {
        log::debug!(
            "no free mnemonic for `{}` ({}) under [{}], {} symbols left",
            command.id,
            command.name,
            format_sequence(parent),
            assignment.leftover.len()
        );
    }
    assignment
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::key::key;

    fn pool(symbols: &[char]) -> IndexSet<char> {
        symbols.iter().copied().collect()
    }

    fn prefix_of(assignment: &Assignment, id: &str) -> Option<Vec<KeyCode>> {
        assignment
            .commands()
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.prefix.clone())
    }

    #[test]
    fn candidates_rank_rarest_preferred_first() {
        let preferred: IndexMap<char, usize> = [('a', 5), ('b', 2), ('c', 10)].into_iter().collect();
        let candidates = candidate_symbols(&preferred, &IndexMap::new());
        let order: String = candidates.iter().collect();
        assert_eq!(order, "bBaAcC");
    }

    #[test]
    fn candidates_rank_fallback_most_common_first() {
        let preferred: IndexMap<char, usize> = [('x', 1)].into_iter().collect();
        let fallback: IndexMap<char, usize> = [('p', 1), ('e', 3), ('x', 2)].into_iter().collect();
        let order: String = candidate_symbols(&preferred, &fallback).iter().collect();
        assert_eq!(order, "xXeEpP");
    }

    #[test]
    fn candidates_keep_first_seen_order_on_ties_and_dedupe_digits() {
        let preferred: IndexMap<char, usize> = [('y', 1), ('1', 1), ('x', 1)].into_iter().collect();
        let order: String = candidate_symbols(&preferred, &IndexMap::new()).iter().collect();
        assert_eq!(order, "yY1xX");
    }

    #[test]
    fn pass_assigns_by_availability() {
        let mut commands = vec![Command::new("file:open", "Open"), Command::new("file:save", "Save")];
        let pools = [pool(&['o']), pool(&['s'])];
        let remaining: RemainingSymbols = "oOsSaAvVeE".chars().collect();

        let residual = assign_pass(&[key('f')], &mut commands, &pools, remaining);

        assert_eq!(commands[0].prefix, Some(vec![key('f'), key('o')]));
        assert_eq!(commands[1].prefix, Some(vec![key('f'), key('s')]));
        assert!(!residual.contains('o'));
        assert!(!residual.contains('s'));
        assert!(residual.contains('O'));
    }

    #[test]
    fn pass_skips_commands_with_prefix() {
        let mut commands = vec![
            Command::new("cmd:first", "First Command").with_prefix(vec![key('x'), key('y')]),
            Command::new("cmd:second", "Second Command"),
        ];
        let pools = [pool(&['f']), pool(&['s'])];
        let remaining: RemainingSymbols = "fFsS".chars().collect();

        let residual = assign_pass(&[key('z')], &mut commands, &pools, remaining);

        assert_eq!(commands[0].prefix, Some(vec![key('x'), key('y')]));
        assert_eq!(commands[1].prefix, Some(vec![key('z'), key('s')]));
        assert!(residual.contains('f'));
    }

    #[test]
    fn pass_matches_case_insensitively_but_keeps_case() {
        let mut commands = vec![Command::new("app:test", "Test App")];
        let pools = [pool(&['t', 'a'])];
        // `t` already taken elsewhere in the bucket
        let remaining: RemainingSymbols = "TaAeEsS".chars().collect();

        let _ = assign_pass(&[key('a')], &mut commands, &pools, remaining);

        assert_eq!(commands[0].prefix, Some(vec![key('a'), key('T')]));
    }

    #[test]
    fn digits_are_preferred_for_numbered_commands() {
        let commands = vec![
            Command::new("heading:level-1", "Heading 1"),
            Command::new("heading:level-2", "Heading 2"),
        ];
        let assignment = determine_prefixes(&[key('h')], commands);
        assert_eq!(prefix_of(&assignment, "heading:level-1"), Some(vec![key('h'), key('1')]));
        assert_eq!(prefix_of(&assignment, "heading:level-2"), Some(vec![key('h'), key('2')]));
    }

    #[test]
    fn uppercase_used_when_initials_collide() {
        let commands = vec![Command::new("app:open", "Open"), Command::new("app:other", "Other")];
        let assignment = determine_prefixes(&[key('a')], commands);
        assert_eq!(prefix_of(&assignment, "app:open"), Some(vec![key('a'), key('o')]));
        assert_eq!(prefix_of(&assignment, "app:other"), Some(vec![key('a'), key('O')]));
    }

    #[test]
    fn rare_letter_goes_to_the_command_that_needs_it() {
        // The exclusive `o` command is listed second so it cannot win by position.
        let commands = vec![
            Command::new("x:open-tab", "Open tab"),
            Command::new("x:o", "O"),
        ];
        let assignment = determine_prefixes(&[], commands);
        assert_eq!(prefix_of(&assignment, "x:open-tab"), Some(vec![key('t')]));
        assert_eq!(prefix_of(&assignment, "x:o"), Some(vec![key('o')]));
    }

    #[test]
    fn fallback_pass_uses_interior_letters() {
        let commands = vec![
            Command::new("a:open", "Open"),
            Command::new("a:other", "Other"),
            Command::new("a:outline", "Outline"),
        ];
        let assignment = determine_prefixes(&[key('a')], commands);
        assert_eq!(prefix_of(&assignment, "a:open"), Some(vec![key('a'), key('o')]));
        assert_eq!(prefix_of(&assignment, "a:other"), Some(vec![key('a'), key('O')]));
        assert_eq!(prefix_of(&assignment, "a:outline"), Some(vec![key('a'), key('e')]));
    }

    #[test]
    fn save_and_download_share_no_sequence() {
        let commands = vec![
            Command::new("editor:save-file", "Save current file"),
            Command::new("editor:download-attachments", "Download attachments for current file"),
        ];
        let assignment = determine_prefixes(&[key('e')], commands);
        assert_eq!(prefix_of(&assignment, "editor:save-file"), Some(vec![key('e'), key('s')]));
        assert_eq!(
            prefix_of(&assignment, "editor:download-attachments"),
            Some(vec![key('e'), key('d')])
        );
    }

    #[test]
    fn exhausted_commands_are_reported_unassigned() {
        let commands = vec![
            Command::new("x:a", "A"),
            Command::new("x:aa", "A"),
            Command::new("x:aaa", "A"),
        ];
        let assignment = determine_prefixes(&[key('x')], commands);
        assert_eq!(assignment.assigned().count(), 2);
        let dropped: Vec<_> = assignment.unassigned().map(|c| c.id.as_str()).collect();
        assert_eq!(dropped, ["x:aaa"]);
        // both `a` and `A` were used up
        assert!(assignment.leftover().is_empty());
    }

    #[test]
    fn nameless_commands_degrade_to_unassigned() {
        let commands = vec![Command::new("", ""), Command::new("x:keep", "Keep")];
        let assignment = determine_prefixes(&[], commands);
        assert_eq!(assignment.unassigned().count(), 1);
        assert_eq!(prefix_of(&assignment, "x:keep"), Some(vec![key('k')]));
        // the nameless command matched nothing, so symbols are still free
        assert_eq!(assignment.leftover().iter().collect::<String>(), "KeEpP");
    }

    #[test]
    fn existing_prefix_under_parent_is_reserved() {
        let commands = vec![
            Command::new("x:save", "Save").with_prefix(vec![key('e'), key('s')]),
            Command::new("x:sync", "Sync"),
        ];
        let assignment = determine_prefixes(&[key('e')], commands);
        assert_eq!(prefix_of(&assignment, "x:save"), Some(vec![key('e'), key('s')]));
        assert_eq!(prefix_of(&assignment, "x:sync"), Some(vec![key('e'), key('S')]));
    }

    #[test]
    fn large_colliding_bucket_yields_unique_sequences() {
        let commands: Vec<Command> = (0..120)
            .map(|i| Command::new(format!("editor:toggle-option-{i}"), format!("Toggle option {i}")))
            .collect();
        let assignment = determine_prefixes(&[key('t')], commands);

        let sequences: Vec<&[KeyCode]> = assignment.assigned().map(|(_, prefix)| prefix).collect();
        let unique: HashSet<&[KeyCode]> = sequences.iter().copied().collect();
        assert_eq!(unique.len(), sequences.len());
        assert!(sequences.iter().all(|s| s.len() == 2 && s[0] == key('t')));
        assert!(assignment.unassigned().count() > 0);
    }
}
