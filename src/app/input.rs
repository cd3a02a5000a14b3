use crate::app::state::App;
use ecosim_core::SimCommand;

impl App {
    /// Applies one scenario key: `q` quits and the editing keys queue a
    /// command for the next tick. Unknown keys are ignored.
    pub fn handle_key(&mut self, key: char) {
        match key {
            'q' | 'Q' => self.sim.stop(),
            _ => {
                let batch = self.sim.config().world.food_batch;
                if let Some(command) = SimCommand::from_key(key, batch) {
                    self.sim.queue(command);
                } else {
                    tracing::debug!(%key, "Unbound key");
                }
            }
        }
    }

    pub fn handle_keys(&mut self, keys: &str) {
        for key in keys.chars() {
            self.handle_key(key);
        }
    }
}
