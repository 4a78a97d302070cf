//! Test module organization for throughput sampling
//!
//! Cross-module unit tests for the sampler, ranking and the end-to-end
//! sample → rank → aggregate → summarize path.

pub mod ranking_tests;

#[cfg(test)]
pub(crate) mod support {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::collectors::bandwidth::errors::MonitorError;
    use crate::collectors::bandwidth::stats::{
        AttributeMap, CounterSnapshot, InterfaceAttributes, InterfaceCounters,
    };
    use crate::collectors::platform::{AttributeSource, CounterSource};

    /// Counter source replaying a fixed sequence of reads
    pub struct ScriptedCounters {
        reads: RefCell<VecDeque<Result<CounterSnapshot, MonitorError>>>,
    }

    impl ScriptedCounters {
        pub fn new(reads: Vec<Result<CounterSnapshot, MonitorError>>) -> Self {
            Self {
                reads: RefCell::new(reads.into()),
            }
        }

        pub fn remaining(&self) -> usize {
            self.reads.borrow().len()
        }
    }

    impl CounterSource for ScriptedCounters {
        fn read(&self) -> Result<CounterSnapshot, MonitorError> {
            self.reads
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(MonitorError::source_unavailable("script", "exhausted")))
        }
    }

    /// Attribute source with fixed link speeds
    #[derive(Default)]
    pub struct FixedAttributes {
        pub speeds: Vec<(String, u32)>,
        pub requested: RefCell<Vec<String>>,
    }

    impl AttributeSource for FixedAttributes {
        fn read(&self, names: &[&str]) -> AttributeMap {
            self.requested
                .borrow_mut()
                .extend(names.iter().map(|name| name.to_string()));
            names
                .iter()
                .map(|name| {
                    let speed_mbps = self
                        .speeds
                        .iter()
                        .find(|(speed_name, _)| speed_name == name)
                        .map(|(_, speed)| *speed);
                    let attrs = InterfaceAttributes {
                        speed_mbps,
                        ..InterfaceAttributes::unknown(name)
                    };
                    (name.to_string(), attrs)
                })
                .collect()
        }
    }

    pub fn counters(name: &str, rx_bytes: u64, tx_bytes: u64) -> InterfaceCounters {
        InterfaceCounters {
            name: name.to_string(),
            rx_bytes,
            tx_bytes,
            ..InterfaceCounters::default()
        }
    }

    pub fn snapshot(entries: Vec<InterfaceCounters>) -> CounterSnapshot {
        entries
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect()
    }
}
