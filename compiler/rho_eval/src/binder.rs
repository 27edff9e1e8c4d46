//! Argument matching.
//!
//! Binds a call's actual arguments to a closure's formals in R's order:
//! exact tags, then unique tag prefixes, then positions. Leftovers either
//! go to `...` or are reported as unused. Matching looks only at tags, so
//! it runs before any argument is evaluated.

use smallvec::SmallVec;

use rho_value::{
    missing_argument, multiple_actual_match, multiple_partial_match, unused_arguments, EvalError,
};

/// What the binder needs to know about one formal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormalSlot<'a> {
    Param { name: &'a str, has_default: bool },
    Ellipsis,
}

/// Outcome of a successful match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matched {
    /// Per formal: index of the actual bound to it. Always `None` for `...`
    /// and for formals left to their default.
    pub bound: Vec<Option<usize>>,
    /// Actuals collected by `...`, in call order.
    pub dots: Vec<usize>,
}

type Flags = SmallVec<[bool; 8]>;

/// Match `actuals` (their tags, in call order) against `formals`.
///
/// Partial matching and positional filling consider only the formals
/// before `...`; formals after it must be named exactly.
pub fn match_arguments(
    formals: &[FormalSlot<'_>],
    actuals: &[Option<&str>],
) -> Result<Matched, EvalError> {
    let ellipsis = formals.iter().position(|f| *f == FormalSlot::Ellipsis);
    let open_end = ellipsis.unwrap_or(formals.len());

    let mut bound: Vec<Option<usize>> = vec![None; formals.len()];
    let mut used: Flags = SmallVec::from_elem(false, actuals.len());

    exact_phase(formals, actuals, &mut bound, &mut used)?;
    partial_phase(formals, actuals, open_end, &mut bound, &mut used)?;
    positional_phase(formals, actuals, open_end, &mut bound, &mut used);

    let leftovers: Vec<usize> = (0..actuals.len()).filter(|&i| !used[i]).collect();
    if ellipsis.is_none() && !leftovers.is_empty() {
        let named_formals = formals.len();
        let entries = leftovers
            .iter()
            .enumerate()
            .map(|(k, &i)| match actuals[i] {
                Some(tag) => format!("{tag} ="),
                None => format!("pos {}", k + named_formals + 1),
            })
            .collect();
        return Err(unused_arguments(entries));
    }

    for (slot, binding) in formals.iter().zip(&bound) {
        if let (
            FormalSlot::Param {
                name,
                has_default: false,
            },
            None,
        ) = (slot, binding)
        {
            return Err(missing_argument(name));
        }
    }

    Ok(Matched {
        bound,
        dots: leftovers,
    })
}

fn exact_phase(
    formals: &[FormalSlot<'_>],
    actuals: &[Option<&str>],
    bound: &mut [Option<usize>],
    used: &mut Flags,
) -> Result<(), EvalError> {
    for (f, slot) in formals.iter().enumerate() {
        let FormalSlot::Param { name, .. } = *slot else {
            continue;
        };
        let mut hits = (0..actuals.len()).filter(|&i| actuals[i] == Some(name));
        if let Some(first) = hits.next() {
            if hits.next().is_some() {
                return Err(multiple_actual_match(name));
            }
            tracing::trace!(formal = name, actual = first, "exact match");
            bound[f] = Some(first);
            used[first] = true;
        }
    }
    Ok(())
}

fn partial_phase(
    formals: &[FormalSlot<'_>],
    actuals: &[Option<&str>],
    open_end: usize,
    bound: &mut [Option<usize>],
    used: &mut Flags,
) -> Result<(), EvalError> {
    for (i, tag) in actuals.iter().enumerate() {
        let Some(tag) = *tag else { continue };
        if used[i] || tag.is_empty() {
            continue;
        }
        let candidates: SmallVec<[usize; 4]> = (0..open_end)
            .filter(|&f| bound[f].is_none())
            .filter(|&f| matches!(formals[f], FormalSlot::Param { name, .. } if name.starts_with(tag)))
            .collect();
        match candidates.as_slice() {
            [] => {}
            [f] => {
                tracing::trace!(tag, formal = *f, "partial match");
                bound[*f] = Some(i);
                used[i] = true;
            }
            _ => return Err(multiple_partial_match(tag)),
        }
    }
    Ok(())
}

fn positional_phase(
    formals: &[FormalSlot<'_>],
    actuals: &[Option<&str>],
    open_end: usize,
    bound: &mut [Option<usize>],
    used: &mut Flags,
) {
    let untagged: SmallVec<[usize; 8]> = (0..actuals.len())
        .filter(|&i| actuals[i].is_none() && !used[i])
        .collect();
    let mut positional = untagged.into_iter();
    for f in 0..open_end {
        if bound[f].is_some() || formals[f] == FormalSlot::Ellipsis {
            continue;
        }
        let Some(i) = positional.next() else { break };
        tracing::trace!(formal = f, actual = i, "positional match");
        bound[f] = Some(i);
        used[i] = true;
    }
}
