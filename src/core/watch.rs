use crate::core::engine::BuildEngine;
use crate::core::Pipeline;
use crate::utils::error::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::future::Future;
use std::path::Path;
use tokio::sync::mpsc;

/// 事件是否涉及內容檔案 (依副檔名判斷)
pub fn is_content_change(event: &Event, extension: &str) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|path| path.extension().and_then(|ext| ext.to_str()) == Some(extension))
}

fn changed_name(event: &Event) -> String {
    event
        .paths
        .first()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Builds once, then rebuilds on content changes until Ctrl-C.
pub async fn watch<P: Pipeline>(
    engine: &BuildEngine<P>,
    content_dir: &Path,
    extension: &str,
) -> Result<()> {
    watch_until(engine, content_dir, extension, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Builds once, then rebuilds on content changes until `shutdown` resolves.
///
/// Rebuilds run one at a time. Notifications that pile up during a rebuild
/// are coalesced into a single follow-up rebuild.
pub async fn watch_until<P, F>(
    engine: &BuildEngine<P>,
    content_dir: &Path,
    extension: &str,
    shutdown: F,
) -> Result<()>
where
    P: Pipeline,
    F: Future<Output = ()>,
{
    tracing::info!("👀 Watching {} for changes...", content_dir.display());
    engine.run().await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        // 接收端關閉代表監看已結束
        let _ = tx.send(res);
    })?;
    watcher.watch(content_dir, RecursiveMode::Recursive)?;

    tokio::pin!(shutdown);

    loop {
        let event = tokio::select! {
            _ = &mut shutdown => break,
            received = rx.recv() => match received {
                Some(event) => event,
                None => break,
            },
        };

        let event = match event {
            Ok(event) if is_content_change(&event, extension) => event,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Watch error: {}", e);
                continue;
            }
        };

        let mut pending = 0;
        while rx.try_recv().is_ok() {
            pending += 1;
        }
        tracing::info!("🔄 {} changed, rebuilding...", changed_name(&event));
        if pending > 0 {
            tracing::debug!("Coalesced {} queued notifications", pending);
        }

        if let Err(e) = engine.run().await {
            tracing::error!("❌ Rebuild failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        }
    }

    tracing::info!("Stopped watching {}", content_dir.display());
    Ok(())
}
