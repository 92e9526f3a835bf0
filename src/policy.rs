use super::*;

/// Relay-policy knobs for output scripts. Callers thread a value through
/// rather than consulting process globals, so two peers with different
/// settings can coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
  pub accept_data_carrier: bool,
  pub max_data_carrier_bytes: usize,
  pub permit_bare_multisig: bool,
}

impl Default for Policy {
  fn default() -> Self {
    Self {
      accept_data_carrier: true,
      max_data_carrier_bytes: MAX_OP_RETURN_RELAY,
      permit_bare_multisig: true,
    }
  }
}

impl Policy {
  /// Classifies `script` and accepts it for relay, returning the type it
  /// solved to. Nonstandard scripts are always rejected; bare multisig must
  /// be permitted and stay within 1-of-1 through n-of-3; data carriers must
  /// be accepted and fit the byte budget.
  pub fn is_standard(&self, script: &Script) -> Option<OutputType> {
    let (output_type, solutions) = solve(script);

    match output_type {
      OutputType::Nonstandard => None,
      OutputType::Multisig
      | OutputType::MultisigReplay
      | OutputType::MultisigData
      | OutputType::MultisigDataReplay => {
        if !self.permit_bare_multisig {
          return None;
        }
        let required = solutions[0][0];
        let total = solutions[solutions.len() - 1][0];
        if !(1..=3).contains(&total) || required < 1 || required > total {
          return None;
        }
        Some(output_type)
      }
      OutputType::Nulldata => {
        if !self.accept_data_carrier || script.len() > self.max_data_carrier_bytes {
          return None;
        }
        Some(output_type)
      }
      _ => Some(output_type),
    }
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::solver::tests::{
      multisig_script, pubkeyhash_script, replay_suffix, KEY1, KEY2, KEY3, KEY4,
    },
    pretty_assertions::assert_eq,
  };

  fn null_data_script(len: usize) -> Vec<u8> {
    let mut bytes = vec![OP_RETURN];
    bytes.extend([OP_PUSHDATA1, len as u8]);
    bytes.extend(vec![0x7f; len]);
    bytes
  }

  #[test]
  fn common_templates_are_standard() {
    assert_eq!(
      Policy::default().is_standard(Script::from_bytes(&pubkeyhash_script([0x11; 20]))),
      Some(OutputType::Pubkeyhash),
    );
  }

  #[test]
  fn nonstandard_scripts_are_rejected() {
    assert_eq!(Policy::default().is_standard(Script::from_bytes(&[OP_DUP])), None);
    assert_eq!(Policy::default().is_standard(Script::from_bytes(&[])), None);
  }

  #[test]
  fn data_carrier_budget() {
    let policy = Policy::default();

    // 83 bytes total: OP_RETURN + OP_PUSHDATA1 + length + 80 bytes
    assert_eq!(
      policy.is_standard(Script::from_bytes(&null_data_script(80))),
      Some(OutputType::Nulldata),
    );
    assert_eq!(
      policy.is_standard(Script::from_bytes(&null_data_script(81))),
      None,
    );

    let policy = Policy {
      accept_data_carrier: false,
      ..Policy::default()
    };
    assert_eq!(
      policy.is_standard(Script::from_bytes(&null_data_script(1))),
      None,
    );
  }

  #[test]
  fn bare_multisig_stays_within_three_keys() {
    let policy = Policy::default();

    assert_eq!(
      policy.is_standard(Script::from_bytes(&multisig_script(2, &[KEY1, KEY2, KEY3]))),
      Some(OutputType::Multisig),
    );
    assert_eq!(
      policy.is_standard(Script::from_bytes(&multisig_script(
        2,
        &[KEY1, KEY2, KEY3, KEY4]
      ))),
      None,
    );
  }

  #[test]
  fn bare_multisig_can_be_disallowed() {
    let policy = Policy {
      permit_bare_multisig: false,
      ..Policy::default()
    };
    assert_eq!(
      policy.is_standard(Script::from_bytes(&multisig_script(1, &[KEY1]))),
      None,
    );
  }

  #[test]
  fn multisig_replay_faces_the_same_limits() {
    let mut bytes = multisig_script(1, &[KEY1]);
    bytes.extend(replay_suffix());
    assert_eq!(
      Policy::default().is_standard(Script::from_bytes(&bytes)),
      Some(OutputType::MultisigReplay),
    );
  }
}
