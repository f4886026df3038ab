//! Prometheus text exposition format.
//!
//! Renders a [`FleetSnapshot`](crate::FleetSnapshot) into the Prometheus
//! text format for scraping. Each metric family carries its HELP/TYPE
//! comment pair, families are blank-line separated, and the body ends
//! with a complete final family — dashboards scrape this verbatim, so
//! the names and label sets here are a contract.

use std::fmt::Write as _;

use crate::sampler::FleetSnapshot;

/// Autoscaler CPU target, exposed as a static reference gauge so
/// dashboards can draw the threshold line.
const HPA_CPU_TARGET: u32 = 70;

/// Autoscaler memory target, same idea.
const HPA_MEMORY_TARGET: u32 = 80;

/// Render a fleet snapshot into Prometheus text format.
///
/// All gauges. `version` lands on the `loadsim_info` label set.
pub fn render_exposition(snapshot: &FleetSnapshot, version: &str) -> String {
    let mut out = String::new();

    family(&mut out, "loadsim_info", "Load simulator build and scenario info");
    let _ = writeln!(
        out,
        "loadsim_info{{scenario=\"{}\",version=\"{}\"}} 1",
        snapshot.scenario, version
    );
    out.push('\n');

    family(&mut out, "loadsim_virtual_users", "Current number of simulated virtual users");
    let _ = writeln!(out, "loadsim_virtual_users {}", snapshot.virtual_users);
    out.push('\n');

    family(&mut out, "loadsim_cpu_percent", "Simulated CPU utilization percentage");
    for s in &snapshot.services {
        let _ = writeln!(
            out,
            "loadsim_cpu_percent{{service=\"{}\"}} {:.2}",
            s.service, s.cpu_percent
        );
    }
    out.push('\n');

    family(&mut out, "loadsim_memory_mb", "Simulated memory usage in MB");
    for s in &snapshot.services {
        let _ = writeln!(
            out,
            "loadsim_memory_mb{{service=\"{}\"}} {:.1}",
            s.service, s.memory_mb
        );
    }
    out.push('\n');

    family(&mut out, "loadsim_replicas", "Simulated pod replica count");
    for s in &snapshot.services {
        let _ = writeln!(
            out,
            "loadsim_replicas{{service=\"{}\"}} {}",
            s.service, s.replicas
        );
    }
    out.push('\n');

    family(&mut out, "loadsim_response_time_ms", "Simulated P95 response time in milliseconds");
    for s in &snapshot.services {
        let _ = writeln!(
            out,
            "loadsim_response_time_ms{{service=\"{}\"}} {:.1}",
            s.service, s.response_time_ms
        );
    }
    out.push('\n');

    family(&mut out, "loadsim_error_rate", "Simulated error rate percentage");
    for s in &snapshot.services {
        let _ = writeln!(
            out,
            "loadsim_error_rate{{service=\"{}\"}} {:.2}",
            s.service, s.error_rate_percent
        );
    }
    out.push('\n');

    family(&mut out, "loadsim_requests_per_second", "Simulated requests per second");
    for s in &snapshot.services {
        let _ = writeln!(
            out,
            "loadsim_requests_per_second{{service=\"{}\"}} {:.1}",
            s.service, s.requests_per_second
        );
    }
    out.push('\n');

    family(&mut out, "loadsim_total_requests_per_second", "Total requests per second across all services");
    let _ = writeln!(
        out,
        "loadsim_total_requests_per_second {:.1}",
        snapshot.total_requests_per_second
    );
    out.push('\n');

    family(&mut out, "loadsim_total_errors_per_second", "Total errors per second across all services");
    let _ = writeln!(
        out,
        "loadsim_total_errors_per_second {:.2}",
        snapshot.total_errors_per_second
    );
    out.push('\n');

    family(&mut out, "loadsim_total_replicas", "Total simulated replicas across all services");
    let _ = writeln!(out, "loadsim_total_replicas {}", snapshot.total_replicas);
    out.push('\n');

    family(&mut out, "loadsim_avg_cpu_percent", "Average simulated CPU across all services");
    let _ = writeln!(out, "loadsim_avg_cpu_percent {:.2}", snapshot.avg_cpu_percent);
    out.push('\n');

    family(&mut out, "loadsim_hpa_cpu_target", "Autoscaler CPU target threshold");
    let _ = writeln!(out, "loadsim_hpa_cpu_target {HPA_CPU_TARGET}");
    out.push('\n');

    family(&mut out, "loadsim_hpa_memory_target", "Autoscaler memory target threshold");
    let _ = writeln!(out, "loadsim_hpa_memory_target {HPA_MEMORY_TARGET}");

    out
}

fn family(out: &mut String, name: &str, help: &str) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} gauge");
}
