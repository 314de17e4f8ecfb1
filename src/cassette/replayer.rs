//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette, serving them in order
/// per `port::method` pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), Vec<Interaction>>,
    cursors: HashMap<(String, String), usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push(interaction.clone());
        }
        Self { queues, cursors: HashMap::new() }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette has no (more) interactions for the
    /// given port/method combination.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction, String> {
        let key = (port.to_string(), method.to_string());

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            return Err(format!(
                "Cassette has no interactions for {port}::{method}. Available: [{}]",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        let Some(interaction) = queue.get(*cursor) else {
            return Err(format!(
                "Cassette exhausted: all {} interactions for {port}::{method} have been consumed",
                queue.len()
            ));
        };
        *cursor += 1;
        Ok(interaction)
    }
}
