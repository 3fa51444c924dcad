//! Application-level entry points: resolving a process to a root element.
//!
//! Process discovery lives here, outside the adapter core: the core only
//! ever sees a pid.  Discovery by name uses the `sysinfo` process table and
//! applies a first-match-wins policy (lowest pid), matching by substring on
//! the process name.

use std::sync::Arc;

use sysinfo::{ProcessRefreshKind, RefreshKind, System};

use crate::driver::AccessibilityDriver;
use crate::element::Element;
use crate::errors::AxError;

/// The accessibility entry point for one running application.
#[derive(Debug, Clone)]
pub struct Application {
    root: Element,
    pid: u32,
}

impl Application {
    /// Resolve the root element for the application owning `pid`.
    pub fn new(driver: Arc<dyn AccessibilityDriver>, pid: u32) -> Result<Self, AxError> {
        let handle = driver
            .application_root(pid)
            .map_err(|status| AxError::native("application root", status))?;
        Ok(Self {
            root: Element::new(driver, handle),
            pid,
        })
    }

    /// Resolve an application by process name.
    ///
    /// Scans the live process table and takes the first process (lowest pid)
    /// whose name contains `name`.  Returns `None` when no such process runs
    /// or the driver cannot resolve a root for it (logged).
    pub fn by_name(driver: Arc<dyn AccessibilityDriver>, name: &str) -> Option<Self> {
        let mut pids = matching_pids(name);
        pids.sort_unstable();
        let pid = *pids.first()?;

        match Self::new(driver, pid) {
            Ok(app) => Some(app),
            Err(err) => {
                log::error!("resolving root for pid {pid} failed: {err}");
                None
            }
        }
    }

    /// Whether any live process matches `name`.
    pub fn is_running(name: &str) -> bool {
        !matching_pids(name).is_empty()
    }

    /// Every running process the driver can resolve a root for.
    pub fn all(driver: &Arc<dyn AccessibilityDriver>) -> Vec<Self> {
        let system = process_table();
        let mut pids: Vec<u32> = system.processes().keys().map(|pid| pid.as_u32()).collect();
        pids.sort_unstable();

        pids.into_iter()
            .filter_map(|pid| Self::new(Arc::clone(driver), pid).ok())
            .collect()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Pre-order search over the whole application tree.
    pub fn find<P>(&self, predicate: P) -> Option<Element>
    where
        P: FnMut(&Element) -> bool,
    {
        self.root.find(predicate)
    }

    /// Windows of the application, in service order.
    pub fn windows(&self) -> Result<Vec<Element>, AxError> {
        self.root.windows()
    }
}

fn process_table() -> System {
    System::new_with_specifics(
        RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
    )
}

fn matching_pids(name: &str) -> Vec<u32> {
    let system = process_table();
    system
        .processes()
        .iter()
        .filter(|(_, process)| process.name().to_string_lossy().contains(name))
        .map(|(pid, _)| pid.as_u32())
        .collect()
}
