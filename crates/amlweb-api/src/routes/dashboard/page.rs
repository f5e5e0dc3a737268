//! Dashboard page rendering - Full page endpoint
//!
//! Endpoints:
//! - page_dashboard: Transactions table
//!
//! Helper functions:
//! - render_dashboard: Render the page body for a dashboard snapshot
//! - render_status: Loading / error / summary banner
//! - render_row: One table row

use crate::AppState;
use amlweb_core::{DashboardSnapshot, LoadStatus, Transaction};
use amlweb_utils::{escape_html, format_number};

const COLUMNS: [&str; 6] = [
    "ID",
    "Amount",
    "Payment Currency",
    "Received Currency",
    "Sender Bank",
    "Receiver Bank",
];

/// Dashboard page - renders whatever the mounted dashboard currently holds
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let snapshot = state.dashboard.read().await.snapshot();
    let inner_content = render_dashboard(&snapshot);
    axum::response::Html(crate::page_response(&headers, "All Transactions", &inner_content))
}

/// Render the dashboard body
pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let header_cells: String = COLUMNS
        .iter()
        .map(|label| format!("<th class='p-2'>{}</th>", label))
        .collect();
    let rows: String = snapshot.transactions.iter().map(render_row).collect();

    format!(
        r#"<h1 class='text-3xl font-bold mb-4'>Admin - Anti-Money Laundering Application</h1>
        <div class='flex items-center justify-between mb-4'>
            <h2 class='text-xl'>All Transactions</h2>
            <button onclick='remountDashboard()' class='px-4 py-2 bg-gray-700 rounded-lg hover:bg-gray-600' title='Fetch transactions again'>Reload</button>
        </div>
        {}
        <div class='overflow-x-auto'>
            <table class='min-w-full bg-gray-800 border border-gray-700'>
                <thead>
                    <tr class='border-b border-gray-700'>{}</tr>
                </thead>
                <tbody>{}</tbody>
            </table>
        </div>
        <script>
        function remountDashboard() {{
            fetch('/api/dashboard/remount', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        setTimeout(() => window.location.reload(), 500);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        render_status(snapshot),
        header_cells,
        rows
    )
}

/// Status banner above the table
fn render_status(snapshot: &DashboardSnapshot) -> String {
    match &snapshot.status {
        LoadStatus::Idle => String::new(),
        LoadStatus::Loading => {
            "<div id='dashboard-status' class='mb-4 p-3 rounded-lg bg-gray-800 text-gray-300'>Loading transactions...</div>"
                .to_string()
        }
        LoadStatus::Loaded => {
            let updated = snapshot
                .loaded_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                "<div id='dashboard-status' class='mb-4 text-sm text-gray-400'>{} transactions, updated {}</div>",
                format_number(snapshot.transactions.len()),
                updated
            )
        }
        LoadStatus::Failed(error) => format!(
            "<div id='dashboard-status' class='mb-4 p-3 rounded-lg bg-red-900 border border-red-700 text-red-100'><p class='font-semibold'>Could not load transactions [{}]</p><p class='text-sm'>{}</p></div>",
            error.code(),
            escape_html(&error.to_string())
        ),
    }
}

/// One table row, keyed by transaction id
fn render_row(tx: &Transaction) -> String {
    let cells = [
        tx.id.to_string(),
        tx.amount.to_string(),
        tx.payment_currency.clone(),
        tx.received_currency.clone(),
        tx.sender_bank.clone(),
        tx.receiver_bank.clone(),
    ];
    let cells: String = cells
        .iter()
        .map(|value| format!("<td class='p-2'>{}</td>", escape_html(value)))
        .collect();
    format!("<tr data-key='{}' class='border-b border-gray-700'>{}</tr>", tx.id, cells)
}
