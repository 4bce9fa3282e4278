//! Integration tests for mounting, driving and tearing down a smoke host.

use std::cell::RefCell;
use std::rc::Rc;

use wisp::prelude::*;
use wisp::{GpuError, TextureError};

#[derive(Default)]
struct Calls {
    prepared_with: Option<(u32, u32, usize)>,
    frames: Vec<Vec<QuadInstance>>,
    resizes: Vec<SurfaceSize>,
    releases: usize,
}

/// Records everything the host asks of it.
struct Recorder {
    calls: Rc<RefCell<Calls>>,
    fail_draw_after: Option<usize>,
}

impl RenderAdapter for Recorder {
    fn prepare(&mut self, texture: &TextureData, pool_size: usize) -> Result<(), SmokeError> {
        self.calls.borrow_mut().prepared_with = Some((texture.width, texture.height, pool_size));
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.calls.borrow_mut().resizes.push(size);
    }

    fn draw(&mut self, quads: &[QuadInstance]) -> Result<(), SmokeError> {
        let mut calls = self.calls.borrow_mut();
        if let Some(limit) = self.fail_draw_after {
            if calls.frames.len() >= limit {
                return Err(GpuError::NotPrepared.into());
            }
        }
        calls.frames.push(quads.to_vec());
        Ok(())
    }

    fn release(&mut self) {
        self.calls.borrow_mut().releases += 1;
    }
}

fn config(pool_size: usize) -> SmokeConfig {
    SmokeConfig::default()
        .with_field(FieldConfig::default().with_pool_size(pool_size).with_seed(77))
        .with_texture(TextureSource::Procedural { size: 32 })
}

fn mounted(pool_size: usize) -> (SmokeHost<Recorder>, Rc<RefCell<Calls>>, CancellationToken) {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut host = SmokeHost::new(config(pool_size));
    let recorder_calls = calls.clone();
    let token = host
        .mount(SurfaceSize::new(640, 360), move |_, _| {
            Ok(Recorder {
                calls: recorder_calls,
                fail_draw_after: None,
            })
        })
        .unwrap();
    (host, calls, token)
}

#[test]
fn mount_prepares_texture_and_pool() {
    let (host, calls, token) = mounted(24);
    assert!(host.is_running());
    assert!(!token.is_cancelled());
    assert_eq!(calls.borrow().prepared_with, Some((32, 32, 24)));
}

#[test]
fn each_frame_draws_whole_pool_and_reschedules() {
    let (mut host, calls, _token) = mounted(24);

    let mut requests = 0;
    let mut schedule = || requests += 1;
    for frame in 0..10 {
        let outcome = host
            .frame_at(0.016, frame as f32 * 0.016, &mut schedule)
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Continue);
    }

    assert_eq!(requests, 10);
    let calls = calls.borrow();
    assert_eq!(calls.frames.len(), 10);
    assert!(calls.frames.iter().all(|f| f.len() == 24));
}

#[test]
fn hover_speeds_up_the_rise() {
    let (mut idle_host, idle_calls, _) = mounted(10);
    let (mut hover_host, hover_calls, _) = mounted(10);
    hover_host.set_active(true);

    let mut noop = || {};
    for frame in 0..30 {
        let t = frame as f32 * 0.016;
        idle_host.frame_at(0.016, t, &mut noop).unwrap();
        hover_host.frame_at(0.016, t, &mut noop).unwrap();
    }

    assert!(hover_host.speed().current() > idle_host.speed().current());
    let idle_y: f32 = idle_calls.borrow().frames[29].iter().map(|q| q.position[1]).sum();
    let hover_y: f32 = hover_calls.borrow().frames[29].iter().map(|q| q.position[1]).sum();
    assert!(hover_y > idle_y);
}

#[test]
fn queued_frame_after_teardown_is_noop() {
    let (mut host, calls, token) = mounted(8);
    host.unmount();
    assert!(token.is_cancelled());

    let mut requests = 0;
    let mut schedule = || requests += 1;
    assert_eq!(
        host.frame_at(0.016, 0.0, &mut schedule).unwrap(),
        FrameOutcome::Stopped
    );
    assert_eq!(host.frame(&mut schedule).unwrap(), FrameOutcome::Stopped);
    assert_eq!(requests, 0);
    assert!(calls.borrow().frames.is_empty());
}

#[test]
fn dispose_twice_releases_once() {
    let (mut host, calls, _) = mounted(8);
    host.unmount();
    host.unmount();
    drop(host);
    assert_eq!(calls.borrow().releases, 1);
}

#[test]
fn render_error_stops_the_loop() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut host = SmokeHost::new(config(4));
    let recorder_calls = calls.clone();
    host.mount(SurfaceSize::new(640, 360), move |_, _| {
        Ok(Recorder {
            calls: recorder_calls,
            fail_draw_after: Some(2),
        })
    })
    .unwrap();

    let mut requests = 0;
    let mut schedule = || requests += 1;
    assert!(host.frame_at(0.016, 0.0, &mut schedule).is_ok());
    assert!(host.frame_at(0.016, 0.016, &mut schedule).is_ok());
    assert!(host.frame_at(0.016, 0.032, &mut schedule).is_err());
    assert_eq!(requests, 2);
}

#[test]
fn missing_texture_is_reported_not_swallowed() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut host = SmokeHost::new(config(4).with_texture(TextureSource::file("does/not/exist.png")));
    let recorder_calls = calls.clone();
    let err = host
        .mount(SurfaceSize::new(640, 360), move |_, _| {
            Ok(Recorder {
                calls: recorder_calls,
                fail_draw_after: None,
            })
        })
        .err()
        .unwrap();

    match err {
        SmokeError::ResourceLoad { resource, source } => {
            assert_eq!(resource, "does/not/exist.png");
            assert!(matches!(source, TextureError::Io(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!host.is_mounted());
    assert_eq!(calls.borrow().releases, 1);
    assert!(calls.borrow().prepared_with.is_none());
}

#[test]
fn resize_reaches_adapter_with_fallback() {
    let (mut host, calls, _) = mounted(4);
    host.resize(SurfaceSize::new(0, 720));
    host.resize(SurfaceSize::new(0, 720));
    assert_eq!(calls.borrow().resizes, vec![SurfaceSize::new(500, 720)]);
}
