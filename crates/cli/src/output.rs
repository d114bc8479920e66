// Terminal rendering (tables, summaries)

use colored::Colorize;
use tabled::{Table, Tabled};
use vani_core::application::{ProgressSnapshot, RunReport};
use vani_core::domain::display::{format_cost, format_duration, format_ended_reason, MISSING_VALUE};
use vani_core::domain::{
    parse_transcript, Agent, AgentStats, AgentSummary, CallRecord, CallResult, NumberAnalysis,
    PhoneLine, SipTrunkCredential, Speaker,
};

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Call ID / Error")]
    detail: String,
}

impl From<&CallResult> for ResultRow {
    fn from(result: &CallResult) -> Self {
        let (status, detail) = if result.ok {
            ("OK", result.id.clone().unwrap_or_else(|| MISSING_VALUE.to_string()))
        } else {
            ("FAILED", result.error.clone().unwrap_or_default())
        };
        Self {
            phone: result.to.to_string(),
            status: status.to_string(),
            detail,
        }
    }
}

#[derive(Tabled)]
struct CallRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Ended Reason")]
    ended_reason: String,
}

impl From<&CallRecord> for CallRow {
    fn from(call: &CallRecord) -> Self {
        Self {
            id: call.id.clone(),
            customer: or_missing(call.customer_number()),
            agent: or_missing(call.agent_name.as_deref()),
            status: or_missing(call.status.as_deref()),
            duration: format_duration(call.started_at.as_deref(), call.ended_at.as_deref()),
            cost: format_cost(call.cost),
            ended_reason: call
                .ended_reason
                .as_deref()
                .map(format_ended_reason)
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
        }
    }
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct PhoneLineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Number / SIP")]
    address: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Agent")]
    agent: String,
}

impl PhoneLineRow {
    fn new(line: &PhoneLine, agents: &[AgentSummary]) -> Self {
        Self {
            id: line.id.clone(),
            address: line.address().to_string(),
            name: or_missing(line.name.as_deref()),
            provider: or_missing(line.provider.as_deref()),
            agent: line.agent_name(agents).to_string(),
        }
    }
}

#[derive(Tabled)]
struct CredentialRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Gateways")]
    gateways: String,
}

impl From<&SipTrunkCredential> for CredentialRow {
    fn from(credential: &SipTrunkCredential) -> Self {
        let gateways = credential
            .gateways
            .iter()
            .map(|g| g.ip.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: credential.id.clone(),
            name: or_missing(credential.name.as_deref()),
            provider: or_missing(credential.provider.as_deref()),
            gateways: or_missing(Some(&gateways)),
        }
    }
}

fn or_missing(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING_VALUE)
        .to_string()
}

pub fn print_analysis(analysis: &NumberAnalysis) {
    println!(
        "  {} {}   {} {}   {} {}   {} {}",
        "Parsed:".bold(),
        analysis.count_raw,
        "Unique:".bold(),
        analysis.count_unique,
        "Valid:".bold(),
        analysis.valid.len().to_string().green(),
        "Invalid:".bold(),
        analysis.invalid.len().to_string().red(),
    );
    if !analysis.invalid.is_empty() {
        println!();
        println!("{}", "Invalid numbers (expected E.164, e.g. +918267818161):".yellow());
        for number in &analysis.invalid {
            println!("  {} {}", "✗".red(), number);
        }
    }
}

pub fn progress_line(progress: &ProgressSnapshot) -> String {
    format!(
        "{:>3}%  {}/{} done  ({} ok, {} failed, {} pending)",
        progress.percent,
        progress.completed,
        progress.total,
        progress.succeeded,
        progress.failed,
        progress.pending
    )
}

pub fn print_report(report: &RunReport) {
    if !report.results.is_empty() {
        let rows: Vec<ResultRow> = report.results.iter().map(ResultRow::from).collect();
        println!("{}", Table::new(rows));
    }

    let progress = &report.progress;
    println!();
    println!("  {} {}", "Run:".bold(), report.run_id);
    println!("  {} {}", "Outcome:".bold(), report.outcome);
    println!(
        "  {} {} / {}   {} {}   {} {}",
        "Completed:".bold(),
        progress.completed,
        progress.total,
        "Succeeded:".bold(),
        progress.succeeded.to_string().green(),
        "Failed:".bold(),
        progress.failed.to_string().red(),
    );
    if progress.pending > 0 {
        println!("  {} {} (not dispatched)", "Pending:".bold(), progress.pending);
    }
    println!("  {} {} ms", "Duration:".bold(), report.duration_ms());
}

pub fn print_calls(calls: &[CallRecord]) {
    if calls.is_empty() {
        println!("{}", "No calls found".yellow());
        return;
    }
    let rows: Vec<CallRow> = calls.iter().map(CallRow::from).collect();
    println!("{}", Table::new(rows));
}

pub fn print_agents(agents: &[AgentSummary]) {
    if agents.is_empty() {
        println!("{}", "No agents found".yellow());
        return;
    }
    let rows: Vec<AgentRow> = agents
        .iter()
        .map(|a| AgentRow {
            id: a.id.clone(),
            name: a.name.clone(),
            status: a.status.to_string(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub fn print_phone_lines(lines: &[PhoneLine], agents: &[AgentSummary]) {
    if lines.is_empty() {
        println!("{}", "No phone numbers found".yellow());
        return;
    }
    let rows: Vec<PhoneLineRow> = lines.iter().map(|l| PhoneLineRow::new(l, agents)).collect();
    println!("{}", Table::new(rows));
}

pub fn print_credentials(credentials: &[SipTrunkCredential]) {
    if credentials.is_empty() {
        println!("{}", "No SIP trunk credentials found".yellow());
        return;
    }
    let rows: Vec<CredentialRow> = credentials.iter().map(CredentialRow::from).collect();
    println!("{}", Table::new(rows));
}

fn success_rate_label(agent: &Agent) -> String {
    agent
        .statistics
        .success_rate()
        .map(|rate| format!("{:.1}%", rate))
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

pub fn print_agent_detail(agent: &Agent) {
    println!("{}", format!("Agent {}", agent.name).cyan().bold());
    println!();
    println!("  {} {}", "ID:".bold(), agent.id);
    println!("  {} {}", "Assistant ID:".bold(), or_missing(agent.vapi_assistant_id.as_deref()));
    println!("  {} {}", "Status:".bold(), agent.status);
    println!("  {} {}", "Category:".bold(), or_missing(agent.metadata.category.as_deref()));
    if !agent.metadata.tags.is_empty() {
        println!("  {} {}", "Tags:".bold(), agent.metadata.tags.join(", "));
    }
    if let Some(description) = agent.metadata.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {} {}", "Description:".bold(), description);
    }
    println!("  {} {}", "Created:".bold(), or_missing(agent.created_at.as_deref()));

    let stats = &agent.statistics;
    println!();
    println!("{}", "Statistics".bold());
    println!(
        "  {} {}  {} {}  {} {}",
        "Calls:".bold(),
        stats.total_calls,
        "OK:".green().bold(),
        stats.successful_calls,
        "Failed:".red().bold(),
        stats.failed_calls
    );
    println!("  {} {}", "Success rate:".bold(), success_rate_label(agent));
    println!("  {} {}", "Last used:".bold(), or_missing(stats.last_used.as_deref()));
}

pub fn print_agent_stats(stats: &AgentStats) {
    println!("{}", "Agent overview".cyan().bold());
    println!();
    println!("  {} {}", "Agents:".bold(), stats.total_agents);
    println!("  {} {}", "Active:".bold(), stats.active_agents);
    println!("  {} {}", "Total calls:".bold(), stats.total_calls);
    println!("  {} {}", "Successful:".green().bold(), stats.successful_calls);
    println!("  {} {}", "Failed:".red().bold(), stats.failed_calls);

    if !stats.most_used.is_empty() {
        println!();
        println!("{}", "Most used".bold());
        for usage in &stats.most_used {
            println!("  {:<24} {} calls", usage.name, usage.calls);
        }
    }
}

pub fn print_call_detail(call: &CallRecord, with_transcript: bool) {
    println!("{}", format!("Call {}", call.id).cyan().bold());
    println!();
    println!("  {} {}", "Customer:".bold(), or_missing(call.customer_number()));
    println!("  {} {}", "Agent:".bold(), or_missing(call.agent_name.as_deref()));
    println!("  {} {}", "Status:".bold(), or_missing(call.status.as_deref()));
    println!("  {} {}", "Started:".bold(), or_missing(call.started_at.as_deref()));
    println!("  {} {}", "Ended:".bold(), or_missing(call.ended_at.as_deref()));
    println!(
        "  {} {}",
        "Duration:".bold(),
        format_duration(call.started_at.as_deref(), call.ended_at.as_deref())
    );
    println!("  {} {}", "Cost:".bold(), format_cost(call.cost));
    if let Some(reason) = call.ended_reason.as_deref() {
        println!("  {} {}", "Ended Reason:".bold(), format_ended_reason(reason));
    }
    if let Some(url) = call.recording_url.as_deref() {
        println!("  {} {}", "Recording:".bold(), url);
    }
    if let Some(summary) = call.summary.as_deref().filter(|s| !s.is_empty()) {
        println!();
        println!("{}", "Summary".bold());
        println!("  {}", summary);
    }

    if !with_transcript {
        return;
    }
    println!();
    println!("{}", "Transcript".bold());
    let lines = call
        .transcript
        .as_deref()
        .map(parse_transcript)
        .unwrap_or_default();
    if lines.is_empty() {
        println!("  {}", "No transcript available".yellow());
    }
    for line in lines {
        match line.speaker {
            Speaker::User => println!("  {} {}", "User:".blue().bold(), line.text),
            Speaker::Ai => println!("  {} {}", "AI:".green().bold(), line.text),
            Speaker::Unknown => println!("  {}", line.text),
        }
    }
}
