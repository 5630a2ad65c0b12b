use super::*;

#[test]
fn write_frames_brackets_with_begin_and_end() {
    let frames = vec![FrameRGBA::filled(4, 2, [1, 2, 3, 255]); 3];
    let mut sink = InMemorySink::new();
    write_frames(&mut sink, &frames, Duration::from_millis(200)).unwrap();

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (4, 2));
    assert_eq!(cfg.frame_delay, Duration::from_millis(200));
    assert!(sink.is_ended());

    let idxs: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idxs, vec![0, 1, 2]);
}

#[test]
fn write_frames_rejects_empty_sequence() {
    let mut sink = InMemorySink::new();
    let err = write_frames(&mut sink, &[], Duration::from_millis(200)).unwrap_err();
    assert!(err.to_string().contains("no frames"));
    assert!(sink.config().is_none());
}

#[test]
fn begin_resets_previous_capture() {
    let mut sink = InMemorySink::new();
    let frames = vec![FrameRGBA::filled(2, 2, [0, 0, 0, 255]); 2];
    write_frames(&mut sink, &frames, Duration::from_millis(100)).unwrap();
    write_frames(&mut sink, &frames[..1], Duration::from_millis(100)).unwrap();
    assert_eq!(sink.frames().len(), 1);
}
