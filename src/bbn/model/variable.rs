use log::trace;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Values a binary variable can be bound to, in binding order.
pub const BINARY_VALUES: [&str; 2] = ["0", "1"];

/// Handle for an interned (name, value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

/// A set of bound variables, e.g. one observed row or one conditioning binding.
pub type Binding = BTreeSet<VariableId>;

/// A named variable bound to a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundVariable {
    pub name: String,
    pub value: String,
}

impl fmt::Display for BoundVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.value)
    }
}

/// Interns (name, value) pairs so that bindings can be compared as sets.
///
/// Keyed by the pair, not the name: `x=0` and `x=1` are distinct ids and
/// nothing stops a caller from putting both into one binding. Entries are
/// never removed except through [`VariableRegistry::clear`].
#[derive(Debug, Default, Clone)]
pub struct VariableRegistry {
    index: HashMap<(String, String), VariableId>,
    variables: Vec<BoundVariable>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `(name, value)`, creating it on first request.
    pub fn intern(&mut self, name: &str, value: &str) -> VariableId {
        if let Some(id) = self.lookup(name, value) {
            return id;
        }
        let id = VariableId(self.variables.len());
        trace!("intern - new variable {}({}) -> {:?}", name, value, id);
        self.variables.push(BoundVariable {
            name: name.to_string(),
            value: value.to_string(),
        });
        self.index
            .insert((name.to_string(), value.to_string()), id);
        id
    }

    pub fn lookup(&self, name: &str, value: &str) -> Option<VariableId> {
        self.index
            .get(&(name.to_string(), value.to_string()))
            .copied()
    }

    pub fn get(&self, id: VariableId) -> Option<&BoundVariable> {
        self.variables.get(id.0)
    }

    /// Distinct variable names seen so far, sorted.
    pub fn names(&self) -> BTreeSet<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    /// Renders a binding as `a(0), b(1)` for log output.
    pub fn describe(&self, binding: &Binding) -> String {
        binding
            .iter()
            .filter_map(|id| self.get(*id))
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Drops every interned pair. Ids handed out earlier become meaningless.
    pub fn clear(&mut self) {
        self.index.clear();
        self.variables.clear();
    }
}
