use sprite_shooter::audio::*;
use sprite_shooter::compute::FrameReport;

#[derive(Default)]
struct Recorder {
    played: Vec<Clip>,
    stops: u32,
}

impl AudioSink for Recorder {
    fn play_one_shot(&mut self, clip: Clip) {
        self.played.push(clip);
    }
    fn stop_all(&mut self) {
        self.stops += 1;
    }
}

#[test]
fn one_gong_per_hit() {
    let mut sink = Recorder::default();
    play_frame(&FrameReport { hits: 3, ..FrameReport::default() }, &mut sink);
    assert_eq!(sink.played, vec![Clip::Gong; 3]);
    assert_eq!(sink.stops, 0);
}

#[test]
fn quiet_frame_plays_nothing() {
    let mut sink = Recorder::default();
    play_frame(&FrameReport::default(), &mut sink);
    assert!(sink.played.is_empty());
}

#[test]
fn reset_stops_sounds() {
    let mut sink = Recorder::default();
    play_frame(&FrameReport { reset: true, ..FrameReport::default() }, &mut sink);
    assert_eq!(sink.stops, 1);
}

#[test]
fn bell_writes_bel_byte() {
    let mut buf = Vec::new();
    {
        let mut bell = Bell::new(&mut buf);
        bell.play_one_shot(Clip::Gong);
        bell.play_one_shot(Clip::Gong);
        bell.stop_all();
    }
    assert_eq!(buf, b"\x07\x07");
}
