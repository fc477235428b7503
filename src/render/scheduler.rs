use std::panic::{AssertUnwindSafe, catch_unwind};

use crossbeam_channel::{Sender, bounded, unbounded};

use crate::foundation::{
    core::FrameIndex,
    error::{WavscopeError, WavscopeResult},
};

/// Aggregated counters for one scheduled render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames the run was asked for.
    pub frames_total: u64,
    /// Frames that completed successfully.
    pub frames_rendered: u64,
    /// Highest frame index completed so far.
    pub highest_frame: Option<FrameIndex>,
}

struct Completion {
    worker: usize,
    frame: FrameIndex,
    result: WavscopeResult<()>,
}

/// Coordinator-owned progress tracker.
struct Progress {
    total: u64,
    highest: Option<FrameIndex>,
    last_percent: u64,
}

impl Progress {
    fn new(total: u64) -> Self {
        Self {
            total,
            highest: None,
            last_percent: 0,
        }
    }

    fn complete(&mut self, frame: FrameIndex) {
        tracing::debug!(frame = frame.0, "frame complete");
        if self.highest.is_some_and(|h| h >= frame) {
            return;
        }
        self.highest = Some(frame);
        let percent = (frame.0 + 1) * 100 / self.total;
        if percent > self.last_percent {
            self.last_percent = percent;
            tracing::info!("{percent}% ({} / {})", frame.0 + 1, self.total);
        }
    }
}

/// Render `[0, total_frames)` on a fixed pool of scoped worker threads.
///
/// `min(worker_max, total_frames)` workers are spawned. Worker `k` starts on frame `k`; when it
/// finishes frame `f` it is handed `f + worker_max`, or retired once that is past the end. Each
/// frame is assigned exactly once.
///
/// The first failing frame stops all further assignment. In-flight frames are drained and the
/// failure is returned as a render error; frames already written are left in place.
#[tracing::instrument(skip(render_one))]
pub fn run_stride_schedule<F>(
    total_frames: u64,
    worker_max: usize,
    render_one: F,
) -> WavscopeResult<RenderStats>
where
    F: Fn(FrameIndex) -> WavscopeResult<()> + Sync,
{
    if worker_max == 0 {
        return Err(WavscopeError::config("worker pool size must be non-zero"));
    }
    let mut stats = RenderStats {
        frames_total: total_frames,
        ..RenderStats::default()
    };
    if total_frames == 0 {
        return Ok(stats);
    }

    let stride = worker_max as u64;
    let workers = stride.min(total_frames) as usize;
    let render_one = &render_one;

    std::thread::scope(|scope| -> WavscopeResult<RenderStats> {
        let (done_tx, done_rx) = unbounded::<Completion>();
        let mut requests: Vec<Option<Sender<FrameIndex>>> = Vec::with_capacity(workers);

        for k in 0..workers {
            let (req_tx, req_rx) = bounded::<FrameIndex>(1);
            let done_tx = done_tx.clone();
            std::thread::Builder::new()
                .name(format!("wavscope-worker-{k}"))
                .spawn_scoped(scope, move || {
                    for frame in req_rx.iter() {
                        let result = catch_unwind(AssertUnwindSafe(|| render_one(frame)))
                            .unwrap_or_else(|_| {
                                Err(WavscopeError::render(format!(
                                    "worker {k} panicked while rendering frame {}",
                                    frame.0
                                )))
                            });
                        let done = Completion {
                            worker: k,
                            frame,
                            result,
                        };
                        if done_tx.send(done).is_err() {
                            break;
                        }
                    }
                })
                .map_err(|e| WavscopeError::resource(format!("failed to spawn worker {k}: {e}")))?;
            requests.push(Some(req_tx));
        }
        drop(done_tx);

        let mut in_flight = 0usize;
        for (k, slot) in requests.iter().enumerate() {
            if let Some(tx) = slot {
                assign(tx, k, FrameIndex(k as u64))?;
                in_flight += 1;
            }
        }

        let mut progress = Progress::new(total_frames);
        let mut failure: Option<WavscopeError> = None;

        while in_flight > 0 {
            let Ok(done) = done_rx.recv() else {
                break;
            };
            in_flight -= 1;

            match done.result {
                Ok(()) => {
                    stats.frames_rendered += 1;
                    progress.complete(done.frame);
                }
                Err(e) if failure.is_none() => {
                    tracing::error!(frame = done.frame.0, worker = done.worker, "{e}");
                    failure = Some(as_render_error(done.frame, e));
                    requests.iter_mut().for_each(|slot| *slot = None);
                }
                Err(e) => {
                    tracing::warn!(frame = done.frame.0, "additional failure after abort: {e}");
                }
            }
            if failure.is_some() {
                continue;
            }

            let next = done.frame.0 + stride;
            if next < total_frames {
                if let Some(tx) = &requests[done.worker] {
                    assign(tx, done.worker, FrameIndex(next))?;
                    in_flight += 1;
                }
            } else {
                requests[done.worker] = None;
            }
        }
        drop(requests);

        stats.highest_frame = progress.highest;
        match failure {
            Some(e) => Err(e),
            None => Ok(stats),
        }
    })
}

fn assign(tx: &Sender<FrameIndex>, worker: usize, frame: FrameIndex) -> WavscopeResult<()> {
    tx.send(frame).map_err(|_| {
        WavscopeError::render(format!(
            "worker {worker} exited before accepting frame {}",
            frame.0
        ))
    })
}

fn as_render_error(frame: FrameIndex, err: WavscopeError) -> WavscopeError {
    match err {
        WavscopeError::Render(_) => err,
        other => WavscopeError::render(format!("frame {} failed: {other}", frame.0)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
