use colored::*;
use portscout_common::config::BannerPolicy;
use portscout_core::services;

use crate::terminal::{colors, print};

const PORT_KEY_WIDTH: usize = 5;

/// Lists the service catalog. Ports whose banner is read are marked.
pub fn services(q_level: u8) -> anyhow::Result<()> {
    print::header("service catalog", q_level);

    let banner_policy: BannerPolicy = BannerPolicy::default();
    for &(port, name) in services::entries() {
        let mut value: String = format!("{}", name.color(colors::SERVICE));
        if banner_policy.applies_to(port) {
            value.push_str(&format!(" {}", "(banner)".color(colors::BANNER)));
        }
        print::aligned_line(&port.to_string(), PORT_KEY_WIDTH, value.normal());
    }

    Ok(())
}
