/// Asserts that the agent with the given ID has at least the specified energy.
#[macro_export]
macro_rules! assert_energy_above {
    ($sim:expr, $id:expr, $min_energy:expr) => {
        let agent = $sim.agent($id).expect("Agent not found in simulation");
        assert!(
            agent.energy > $min_energy,
            "Agent {} energy {} is not above {}",
            $id,
            agent.energy,
            $min_energy
        );
    };
}

/// Asserts that no live agent has the given ID.
#[macro_export]
macro_rules! assert_agent_dead {
    ($sim:expr, $id:expr) => {
        assert!(
            $sim.agent($id).is_none(),
            "Agent {} should be dead but was found alive",
            $id
        );
    };
}

/// Asserts both population sizes.
#[macro_export]
macro_rules! assert_population {
    ($sim:expr, prey = $prey:expr, predators = $predators:expr) => {
        assert_eq!($sim.prey().len(), $prey, "Prey count mismatch");
        assert_eq!(
            $sim.predators().len(),
            $predators,
            "Predator count mismatch"
        );
    };
}

/// Asserts that every structural invariant holds.
#[macro_export]
macro_rules! assert_invariants {
    ($sim:expr) => {
        if let Err(violation) = $sim.check_invariants() {
            panic!("Invariant violated at tick {}: {}", $sim.tick_count(), violation);
        }
    };
}
