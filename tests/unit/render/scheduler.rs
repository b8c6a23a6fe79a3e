use super::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn zero_fps_is_rejected() {
    assert!(matches!(FrameClock::new(0), Err(PitchError::Validation(_))));
    assert!(RenderScheduler::new(0).is_err());
}

#[test]
fn clock_caps_the_frame_rate() {
    let mut clock = FrameClock::new(60).unwrap();
    let t0 = Instant::now();
    assert!(clock.poll(t0));
    assert!(!clock.poll(t0 + ms(5)));
    assert!(clock.poll(t0 + ms(16)));
    assert!(!clock.poll(t0 + ms(20)));
    assert!(clock.poll(t0 + ms(40)));
}

#[test]
fn stopped_clock_never_fires() {
    let mut clock = FrameClock::new(60).unwrap();
    clock.stop();
    assert!(!clock.is_running());
    assert!(!clock.poll(Instant::now()));
}

#[test]
fn presents_only_when_dirty() {
    let mut sched = RenderScheduler::new(1000).unwrap();
    let t0 = Instant::now();
    assert_eq!(sched.begin_frame(t0), FrameDecision::Clean);

    sched.mark_dirty(DirtyReason::Viewport);
    sched.mark_dirty(DirtyReason::Viewport);
    sched.mark_dirty(DirtyReason::Segments(CurveKind::Reference));
    assert_eq!(sched.dirty_reasons().len(), 2);
    assert_eq!(sched.begin_frame(t0 + ms(10)), FrameDecision::Present);
    sched.finish_frame();

    assert!(!sched.is_dirty());
    assert_eq!(sched.begin_frame(t0 + ms(20)), FrameDecision::Clean);
    assert_eq!(sched.presented_frames(), 1);
}

#[test]
fn dirty_state_survives_a_frame_that_is_not_due() {
    let mut sched = RenderScheduler::new(10).unwrap();
    let t0 = Instant::now();
    assert_eq!(sched.begin_frame(t0), FrameDecision::Clean);
    sched.mark_dirty(DirtyReason::Resize);
    assert_eq!(sched.begin_frame(t0 + ms(1)), FrameDecision::NotDue);
    assert!(sched.is_dirty());
    assert_eq!(sched.begin_frame(t0 + ms(100)), FrameDecision::Present);
}

#[test]
fn stopped_scheduler_is_never_due() {
    let mut sched = RenderScheduler::new(60).unwrap();
    sched.mark_dirty(DirtyReason::CurveColor);
    sched.stop();
    assert!(!sched.is_running());
    assert_eq!(sched.begin_frame(Instant::now()), FrameDecision::NotDue);
}
