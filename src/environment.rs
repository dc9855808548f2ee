use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: Value,
    pub initialized: bool,
}

/// The single global scope of a session.
///
/// Variables are kept in definition order; listings walk them newest
/// first. Redefining a name overwrites its value in place.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: Vec<Variable>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound to `name`, or `Null` when there is none.
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).cloned().unwrap_or(Value::Null)
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables
            .iter()
            .find(|var| var.name == name && var.initialized)
            .map(|var| &var.value)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: Value) {
        match self.variables.iter_mut().find(|var| var.name == name) {
            Some(var) => {
                var.value = value;
                var.initialized = true;
            }
            None => self.variables.push(Variable {
                name: name.to_string(),
                value,
                initialized: true,
            }),
        }
    }

    /// Newest definition first.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn clear(&mut self) {
        self.variables.clear();
    }
}
