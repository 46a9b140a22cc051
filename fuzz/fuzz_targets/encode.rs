// cargo fuzz run encode corpus/encode -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;
use minitel_gif::Encoder;
use pix::rgb::SRgba8;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let width = u32::from(data[0]).max(1);
    let pixels: Vec<SRgba8> = data[1..]
        .chunks_exact(4)
        .map(|c| SRgba8::new(c[0], c[1], c[2], c[3]))
        .collect();
    let height = pixels.len() as u32 / width;
    let n = (width * height) as usize;
    let mut enc = Encoder::default();
    if enc.add(&pixels[..n], width, height, 40).is_ok() {
        let gif = enc.save().unwrap();
        assert_eq!(&gif[..6], b"GIF89a");
        assert_eq!(gif.last(), Some(&0x3B));
    }
});
