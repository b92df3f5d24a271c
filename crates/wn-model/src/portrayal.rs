//! Pure rendering lookup from agent to display attributes.
//!
//! No dependency on the scheduler; a UI layer calls this per agent per
//! frame. Colors follow the collector's fill bands.

use wn_env::WasteNetObs;
use wn_sched::LocalAgent;

use crate::agents::{DepotAgent, DumpsterAgent};

const COLOR_DEPOT: &str = "#f1f3f4";
const COLOR_EMPTY: &str = "#9CCC65";
const COLOR_MEDIUM: &str = "#FFEE58";
const COLOR_FULL: &str = "#FFA726";
const COLOR_OVERFLOW: &str = "#EF5350";

/// Display attributes for one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Portrayal {
    pub shape: &'static str,
    pub color: &'static str,
    pub layer: u8,
    pub radius: f64,
    pub filled: bool,
    pub text: Option<String>,
}

fn fill_color(fill: u8) -> &'static str {
    match fill {
        0..=20 => COLOR_EMPTY,
        21..=79 => COLOR_MEDIUM,
        80..=99 => COLOR_FULL,
        _ => COLOR_OVERFLOW,
    }
}

/// Map an agent to its display attributes.
///
/// Unknown agent types get a small neutral marker so a custom population
/// still renders.
pub fn agent_portrayal(agent: &dyn LocalAgent<WasteNetObs>) -> Portrayal {
    if let Some(dumpster) = agent.as_any().downcast_ref::<DumpsterAgent>() {
        let fill = dumpster.fill_level();
        return Portrayal {
            shape: "circle",
            color: fill_color(fill),
            layer: 2,
            radius: 0.8,
            filled: true,
            text: Some(format!("{fill}%")),
        };
    }
    if agent.as_any().downcast_ref::<DepotAgent>().is_some() {
        return Portrayal {
            shape: "rect",
            color: COLOR_DEPOT,
            layer: 1,
            radius: 1.0,
            filled: true,
            text: None,
        };
    }
    Portrayal {
        shape: "circle",
        color: COLOR_DEPOT,
        layer: 1,
        radius: 0.3,
        filled: false,
        text: None,
    }
}
