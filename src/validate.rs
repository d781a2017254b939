use crate::dictionary::AiEntry;
use crate::Error;
use num_enum::TryFromPrimitive;
use std::sync::Arc;

/// The cross-AI validations and tunables, in execution order.
///
/// Locked entries are integral to GS1 conformance and may not be
/// toggled; the rest default to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Validation {
    /// `ex=` mutual exclusion between parsed AIs
    MutexAis = 0,
    /// `req=` requisite satisfaction
    RequisiteAis = 1,
    /// Repeated AIs must carry identical values
    RepeatedAis = 2,
    /// AI 8030 requires the serial component of its key AI
    DigsigSerialKey = 3,
    /// Reject vivified AIs as DL data attributes (consulted by the DL
    /// parser and generator, not a post-parse pass)
    UnknownAiNotDlAttr = 4,
}

impl Validation {
    pub(crate) const COUNT: usize = 5;

    #[must_use]
    pub fn locked(self) -> bool {
        matches!(self, Self::MutexAis | Self::RepeatedAis | Self::DigsigSerialKey)
    }
}

/// Digit prefix of an `ex=`/`req=` token; the token matches any AI code
/// beginning with it.
fn token_prefix(token: &str) -> &str {
    let n = token.bytes().take_while(u8::is_ascii_digit).count();
    &token[..n]
}

fn any_match(ais: &[(Arc<AiEntry>, &str)], token: &str) -> bool {
    let prefix = token_prefix(token);
    !prefix.is_empty() && ais.iter().any(|(e, _)| e.ai.starts_with(prefix))
}

/// Runs the enabled post-parse validators over the parsed AI values, in
/// table order; the first failure aborts.
pub(crate) fn run(
    enabled: &[bool; Validation::COUNT],
    ais: &[(Arc<AiEntry>, &str)],
) -> Result<(), Error> {
    if enabled[Validation::MutexAis as usize] {
        mutex_ais(ais)?;
    }
    if enabled[Validation::RequisiteAis as usize] {
        requisite_ais(ais)?;
    }
    if enabled[Validation::RepeatedAis as usize] {
        repeated_ais(ais)?;
    }
    if enabled[Validation::DigsigSerialKey as usize] {
        digsig_serial_key(ais)?;
    }
    Ok(())
}

fn mutex_ais(ais: &[(Arc<AiEntry>, &str)]) -> Result<(), Error> {
    for (i, (entry, _)) in ais.iter().enumerate() {
        for token in &entry.exclusions {
            let prefix = token_prefix(token);
            if prefix.is_empty() {
                continue;
            }
            for (j, (other, _)) in ais.iter().enumerate() {
                if j != i && other.ai.starts_with(prefix) {
                    return Err(Error::InvalidAiPairs {
                        ai: entry.ai.clone(),
                        other: other.ai.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn requisite_ais(ais: &[(Arc<AiEntry>, &str)]) -> Result<(), Error> {
    for (entry, _) in ais {
        for groups in &entry.requisites {
            let satisfied = groups
                .iter()
                .any(|group| group.iter().all(|member| any_match(ais, member)));
            if !satisfied {
                return Err(Error::RequiredAisNotSatisfied {
                    ai: entry.ai.clone(),
                });
            }
        }
    }
    Ok(())
}

fn repeated_ais(ais: &[(Arc<AiEntry>, &str)]) -> Result<(), Error> {
    for (i, (entry, value)) in ais.iter().enumerate() {
        for (other, other_value) in &ais[i + 1..] {
            if entry.ai == other.ai && value != other_value {
                return Err(Error::InstancesOfAiHaveDifferentValues {
                    ai: entry.ai.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Keys referenced by a digital signature must include their optional
/// serial component.
const DIGSIG_SERIAL_KEYS: [&str; 3] = ["253", "255", "8003"];

fn digsig_serial_key(ais: &[(Arc<AiEntry>, &str)]) -> Result<(), Error> {
    if !ais.iter().any(|(e, _)| e.ai == "8030") {
        return Ok(());
    }
    for (entry, value) in ais {
        if DIGSIG_SERIAL_KEYS.contains(&entry.ai.as_str()) && value.len() <= entry.min_length() {
            return Err(Error::SerialNotPresent {
                ai: entry.ai.clone(),
            });
        }
    }
    Ok(())
}