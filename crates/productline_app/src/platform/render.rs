use productline_core::{AppViewModel, CollectionStatus, JobRowView, PanelView, Timestamp};

/// Renders the whole view as console lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if view.fetching_product_lines {
        lines.push("Loading product lines...".to_string());
    }
    if let Some(error) = &view.load_error {
        lines.push(format!("Could not load product lines: {error}"));
    }
    if view.panels.is_empty() && !view.fetching_product_lines {
        lines.push("No product lines.".to_string());
    }
    for panel in &view.panels {
        lines.extend(render_panel(panel));
    }
    lines
}

fn render_panel(panel: &PanelView) -> Vec<String> {
    let caret = if panel.is_expanded { 'v' } else { '>' };
    let mut lines = vec![format!(
        "{caret} {} [{}] {}",
        panel.title,
        panel.product_line_id,
        collection_badge(panel)
    )];
    if !panel.is_expanded {
        return lines;
    }

    for row in &panel.metadata {
        lines.push(format!("    {:<15}{}", row.label, row.value));
    }

    let window = panel
        .since_dates
        .iter()
        .find(|option| option.value == panel.since_date)
        .map(|option| option.label.to_string())
        .unwrap_or_else(|| format!("since {}", short_time(panel.since_date)));
    lines.push(format!("    Activity ({window})"));

    if panel.is_loading {
        lines.push("      loading...".to_string());
    }
    if let Some(error) = &panel.error {
        lines.push(format!("      error: {error}"));
    }
    if panel.jobs.is_empty() && !panel.is_loading {
        lines.push("      no jobs in this window".to_string());
    }
    lines.extend(panel.jobs.iter().map(render_row));
    lines
}

fn render_row(row: &JobRowView) -> String {
    let marker = if row.selected { '*' } else { ' ' };
    if row.loading {
        return format!("     {marker}{} (importing...)", row.job_id);
    }
    format!(
        "     {marker}{} {} {} {}",
        row.job_id,
        row.name.as_deref().unwrap_or("-"),
        row.status.as_deref().unwrap_or("-"),
        row.created_on.map(short_time).unwrap_or_default()
    )
}

fn collection_badge(panel: &PanelView) -> String {
    let summary = &panel.collection;
    let status = match summary.status {
        CollectionStatus::Idle => "idle",
        CollectionStatus::Fetching => "fetching",
        CollectionStatus::FetchError => "error",
    };
    let mut badge = format!("store: {status}, {} jobs", summary.record_count);
    if summary.loading_count > 0 {
        badge.push_str(&format!(", {} importing", summary.loading_count));
    }
    if let Some(error) = &summary.error {
        badge.push_str(&format!(" ({error})"));
    }
    badge
}

fn short_time(value: Timestamp) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use productline_core::{update, AppState, Job, JobRecord, Msg, PanelMsg, ProductLine};

    fn ts(raw: &str) -> Timestamp {
        raw.parse().unwrap()
    }

    #[test]
    fn empty_view_says_so() {
        assert_eq!(render(&AppViewModel::default()), ["No product lines."]);
    }

    #[test]
    fn expanded_panel_lists_rows() {
        let now = ts("2024-03-10T15:42:00Z");
        let (state, _) = update(
            AppState::new(),
            Msg::ProductLinesLoaded {
                records: vec![ProductLine::new("pl-1", "Coastline", ts("2023-06-01T08:30:00Z"))],
                received_at: now,
            },
        );
        let (state, _) = update(
            state,
            Msg::Panel {
                product_line_id: "pl-1".to_string(),
                msg: PanelMsg::ToggleExpansion,
            },
        );
        let mut job = Job::new("j1", ts("2024-03-10T12:00:00Z"));
        job.name = Some("Coastline 2024-03-10".to_string());
        let (state, _) = update(
            state,
            Msg::Panel {
                product_line_id: "pl-1".to_string(),
                msg: PanelMsg::JobsLoaded(vec![JobRecord::Full(job), JobRecord::loading("j2")]),
            },
        );

        let lines = render(&state.view(now));
        assert_eq!(lines[0], "v Coastline [pl-1] store: fetching, 0 jobs");
        assert!(lines.contains(&"    Activity (Last 24 Hours)".to_string()));
        assert!(lines.contains(&"      j2 (importing...)".to_string()));
        assert!(lines.contains(&"      j1 Coastline 2024-03-10 - 2024-03-10 12:00".to_string()));
    }
}
