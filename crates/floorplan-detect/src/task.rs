//! Background detection with supersede semantics.
//!
//! Detection is CPU-bound and synchronous; run on a UI thread it would
//! block for the whole pipeline. The runner moves each request onto its own
//! worker thread and cancels the in-flight run when a newer request for the
//! same floor plan arrives: requests supersede, they do not queue.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use floorplan_core::Room;
use log::debug;

use crate::cancel::CancelToken;
use crate::detector::RoomDetector;
use crate::error::DetectError;
use crate::params::DetectorParams;
use crate::raster::RasterBuffer;
use crate::synth::SynthesisTarget;

/// Handle to one in-flight detection run.
pub struct DetectionHandle {
    cancel: CancelToken,
    rx: mpsc::Receiver<Result<Vec<Room>, DetectError>>,
    worker: JoinHandle<()>,
}

impl DetectionHandle {
    /// Ask the run to stop. The worker notices within one poll stride.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Block until the run completes and return its result. A cancelled or
    /// superseded run yields [`DetectError::Cancelled`].
    pub fn join(self) -> Result<Vec<Room>, DetectError> {
        let result = self.rx.recv().unwrap_or(Err(DetectError::Cancelled));
        let _ = self.worker.join();
        result
    }
}

/// Spawn one detection run on a fresh worker thread.
///
/// The image buffer moves into the worker; there is no shared mutable
/// state between runs.
pub fn spawn_detection(
    params: DetectorParams,
    image: RasterBuffer,
    target: SynthesisTarget,
) -> DetectionHandle {
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let (tx, rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        let detector = RoomDetector::new(params);
        let result = detector.detect_cancelable(&image.view(), &target, &token);
        // the receiver may be gone if the handle was dropped after cancel
        let _ = tx.send(result);
    });

    DetectionHandle {
        cancel,
        rx,
        worker,
    }
}

/// Owns at most one in-flight detection run per floor-plan editor session.
pub struct DetectionRunner {
    params: DetectorParams,
    current: Option<DetectionHandle>,
}

impl DetectionRunner {
    pub fn new(params: DetectorParams) -> Self {
        Self {
            params,
            current: None,
        }
    }

    /// Start a detection run, superseding any run still in flight.
    ///
    /// The superseded run is cancelled and detached; its result is
    /// discarded, never delivered.
    pub fn request(&mut self, image: RasterBuffer, target: SynthesisTarget) {
        if let Some(stale) = self.current.take() {
            debug!("superseding in-flight detection run");
            stale.cancel();
        }
        self.current = Some(spawn_detection(self.params.clone(), image, target));
    }

    pub fn is_running(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Block for the current run's result, or `None` when nothing was
    /// requested since the last wait.
    pub fn wait(&mut self) -> Option<Result<Vec<Room>, DetectError>> {
        self.current.take().map(DetectionHandle::join)
    }

    /// Cancel the current run without waiting for it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Large all-dark canvas with one white rectangle per `rects` entry.
    fn canvas(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> RasterBuffer {
        let mut data = vec![0u8; width * height * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        for &(rx, ry, rw, rh) in rects {
            for y in ry..ry + rh {
                for x in rx..rx + rw {
                    let off = (y * width + x) * 4;
                    data[off] = 255;
                    data[off + 1] = 255;
                    data[off + 2] = 255;
                }
            }
        }
        RasterBuffer {
            width,
            height,
            data,
        }
    }

    fn target(start_index: usize) -> SynthesisTarget {
        SynthesisTarget::new(900, 900, start_index, "color-a", "section-a")
    }

    #[test]
    fn background_run_delivers_rooms() {
        let handle = spawn_detection(
            DetectorParams::default(),
            canvas(300, 300, &[(50, 50, 100, 80)]),
            target(0),
        );
        let rooms = handle.join().unwrap();
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn cancelled_run_reports_cancelled() {
        let handle = spawn_detection(
            DetectorParams::default(),
            canvas(600, 600, &[(50, 50, 400, 400)]),
            target(0),
        );
        handle.cancel();
        // worst case the run already finished before the flag landed
        match handle.join() {
            Err(DetectError::Cancelled) | Ok(_) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut runner = DetectionRunner::new(DetectorParams::default());
        runner.request(canvas(600, 600, &[(50, 50, 200, 200)]), target(0));
        runner.request(canvas(300, 300, &[(40, 40, 80, 60), (160, 40, 80, 60)]), target(0));

        let rooms = runner.wait().unwrap().unwrap();
        // the delivered result belongs to the second request
        assert_eq!(rooms.len(), 2);
        assert!(runner.wait().is_none());
    }

    #[test]
    fn cancel_clears_the_current_run() {
        let mut runner = DetectionRunner::new(DetectorParams::default());
        runner.request(canvas(300, 300, &[(50, 50, 100, 80)]), target(0));
        runner.cancel();
        assert!(runner.wait().is_none());
    }
}
