use rand::{rngs::StdRng, Rng, SeedableRng};

use safesight::{
    AnalysisError, DetectionConfig, EyeColorSample, EyePoint, FrameInput, SessionRegistry,
    SessionStatus,
};

const FPS: f64 = 30.0;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn frame_at(left_x: f64, right_x: f64, capture_time: f64) -> FrameInput {
    FrameInput {
        left_eye: EyePoint::new(left_x, 240.0),
        right_eye: EyePoint::new(right_x, 240.0),
        face_width_px: 150.0,
        frame_width: 640,
        frame_height: 480,
        capture_time,
        eye_color: None,
    }
}

/// Steady gaze drifting at 5 px/s, sampled with jittered frame intervals.
/// Linear motion survives irregular spacing under the central difference.
fn steady_frames(count: usize, rng: &mut StdRng) -> Vec<FrameInput> {
    let mut t = 0.0;
    (0..count)
        .map(|_| {
            let frame = frame_at(100.0 + 5.0 * t, 300.0 + 5.0 * t, t);
            t += (1.0 / FPS) * rng.gen_range(0.8..1.2);
            frame
        })
        .collect()
}

/// Horizontal oscillation at 4 Hz with 30 px amplitude: peak velocities far
/// past the 50 px/s threshold, with sign flips that break consistency.
fn oscillating_frames(count: usize) -> Vec<FrameInput> {
    (0..count)
        .map(|i| {
            let t = i as f64 / FPS;
            let swing = 30.0 * (2.0 * std::f64::consts::PI * 4.0 * t).sin();
            frame_at(100.0 + swing, 300.0 + swing, t)
        })
        .collect()
}

#[tokio::test]
async fn steady_session_reports_not_detected() {
    init_logging();
    let registry = SessionRegistry::new();
    let id = registry.start_session().await;

    let mut rng = StdRng::seed_from_u64(7);
    for frame in steady_frames(60, &mut rng) {
        let analysis = registry.process_frame(&id, frame).await.unwrap();
        assert!(analysis.distance_valid);
        assert!(analysis.confidence.abs() < f64::EPSILON);
    }

    let report = registry.complete_session(&id).await.unwrap();
    assert!(!report.nystagmus_detected);
    assert!(report.confidence.abs() < f64::EPSILON);
    assert_eq!(report.frames_analyzed, 60);
    assert!(report.test_duration_s > 1.5);
    assert_eq!(
        registry.session_status(&id).await.unwrap(),
        SessionStatus::Completed
    );
}

#[tokio::test]
async fn oscillating_session_reports_detected_with_full_confidence() {
    init_logging();
    let registry = SessionRegistry::new();
    let id = registry.start_session().await;

    let mut last = None;
    for frame in oscillating_frames(45) {
        last = Some(registry.process_frame(&id, frame).await.unwrap());
    }

    let analysis = last.unwrap();
    assert!(analysis.nystagmus_detected);
    assert!((analysis.confidence - 1.0).abs() < f64::EPSILON);

    let report = registry.complete_session(&id).await.unwrap();
    assert!(report.nystagmus_detected);
    assert!((report.confidence - 1.0).abs() < f64::EPSILON);
    assert_eq!(report.frames_analyzed, 45);
}

#[tokio::test]
async fn rejected_frames_leave_the_series_intact() {
    init_logging();
    let registry = SessionRegistry::new();
    let id = registry.start_session().await;

    let mut rng = StdRng::seed_from_u64(11);
    let frames = steady_frames(10, &mut rng);
    for frame in &frames {
        registry.process_frame(&id, frame.clone()).await.unwrap();
    }

    // Subject leaned out of range
    let mut too_far = frame_at(100.0, 300.0, 10.0);
    too_far.face_width_px = 90.0;
    let err = registry.process_frame(&id, too_far).await.unwrap_err();
    assert!(matches!(err, AnalysisError::DistanceOutOfRange { .. }));

    // Clock went backwards
    let stale = frame_at(100.0, 300.0, frames[4].capture_time);
    let err = registry.process_frame(&id, stale).await.unwrap_err();
    assert!(matches!(err, AnalysisError::OutOfOrderSample { .. }));

    let report = registry.complete_session(&id).await.unwrap();
    assert_eq!(report.frames_analyzed, 10);
}

#[tokio::test]
async fn redness_screen_runs_only_after_escalation() {
    init_logging();
    let registry = SessionRegistry::new();
    let id = registry.start_session().await;

    let bloodshot = EyeColorSample {
        r: 180.0,
        g: 100.0,
        b: 90.0,
    };

    let mut saw_redness = false;
    for mut frame in oscillating_frames(40) {
        frame.eye_color = Some((bloodshot, bloodshot));
        let analysis = registry.process_frame(&id, frame).await.unwrap();
        if analysis.confidence <= 0.5 {
            assert!(analysis.redness.is_none());
        } else if let Some(redness) = analysis.redness {
            assert!(redness.is_red);
            saw_redness = true;
        }
    }
    assert!(saw_redness, "escalation never reached the redness screen");
}

#[tokio::test]
async fn confidence_stays_quantized_for_arbitrary_input() {
    init_logging();
    let registry = SessionRegistry::new();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..5 {
        let id = registry.start_session().await;
        let mut x = 100.0f64;
        for i in 0..30 {
            x += rng.gen_range(-8.0..8.0);
            let analysis = registry
                .process_frame(&id, frame_at(x, x + 200.0, i as f64 / FPS))
                .await
                .unwrap();
            assert!(
                [0.0, 0.5, 1.0].contains(&analysis.confidence),
                "confidence {} is not quantized",
                analysis.confidence
            );
        }
        let report = registry.complete_session(&id).await.unwrap();
        assert!([0.0, 0.5, 1.0].contains(&report.confidence));
    }
}

#[tokio::test]
async fn custom_config_moves_the_distance_window() {
    init_logging();
    let config = DetectionConfig {
        min_distance_mm: 500.0,
        max_distance_mm: 600.0,
        ..DetectionConfig::default()
    };
    let registry = SessionRegistry::with_config(config);
    let id = registry.start_session().await;

    // 150px face -> 700mm, now outside the narrowed window
    let err = registry
        .process_frame(&id, frame_at(100.0, 300.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::DistanceOutOfRange { .. }));

    // 190px face -> ~553mm, inside
    let mut close = frame_at(100.0, 300.0, 0.1);
    close.face_width_px = 190.0;
    let analysis = registry.process_frame(&id, close).await.unwrap();
    assert!(analysis.distance_valid);
    assert!(analysis.distance_mm > 500.0 && analysis.distance_mm < 600.0);
}
