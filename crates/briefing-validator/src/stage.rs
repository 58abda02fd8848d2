use std::fmt;

/// Data-entry stages of the designer wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
  Identity,
  BasicInfo,
  Design,
}

impl Stage {
  pub const ALL: [Stage; 3] = [Stage::Identity, Stage::BasicInfo, Stage::Design];

  pub fn index(self) -> usize {
    self as usize
  }

  pub fn from_index(index: usize) -> Option<Self> {
    Self::ALL.get(index).copied()
  }

  pub fn label(self) -> &'static str {
    match self {
      Stage::Identity => "Identity",
      Stage::BasicInfo => "Basic info",
      Stage::Design => "Design",
    }
  }

  pub fn is_last(self) -> bool {
    self.index() + 1 == Self::ALL.len()
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
