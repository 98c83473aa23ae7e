use crate::bulk::run_bulk;
use crate::state::AppState;

pub async fn handle_bulk(
    state: &AppState,
    query: Option<&str>,
    note_ids: &[u64],
) -> anyhow::Result<()> {
    let mut ids = note_ids.to_vec();
    if let Some(query) = query {
        let found = state.anki.find_notes(query).await?;
        tracing::info!("Query '{}' selected {} notes", query, found.len());
        ids.extend(found.into_iter().filter(|id| !note_ids.contains(id)));
    }

    let media = state.anki_media();
    let report = run_bulk(&state.pipeline(&media), &state.anki, &ids).await;

    if report.processed > 0 {
        println!("{}", report.summary());
    }
    Ok(())
}
