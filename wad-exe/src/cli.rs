use argh::FromArgs;
use wad::DecodeOptions;

/// Inspect and extract the contents of WAD files
#[derive(Debug, Clone, FromArgs)]
pub struct CliOptions {
    /// WAD files to read, each is handled on its own
    #[argh(positional)]
    pub wads: Vec<String>,
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// print the song list
    #[argh(switch)]
    pub musicinfo: bool,
    /// print the map list
    #[argh(switch)]
    pub mapsinfo: bool,
    /// write the lump list to this file
    #[argh(option)]
    pub lumpsinfo_dump: Option<String>,
    /// write the song list to this file
    #[argh(option)]
    pub musicinfo_dump: Option<String>,
    /// write the map list to this file
    #[argh(option)]
    pub mapsinfo_dump: Option<String>,
    /// copy every song to this directory
    #[argh(option)]
    pub music_export: Option<String>,
    /// render every sprite to a PNG in this directory
    #[argh(option)]
    pub sprites_export: Option<String>,
    /// render every wall patch to a PNG in this directory
    #[argh(option)]
    pub patches_export: Option<String>,
    /// render every flat to a PNG in this directory
    #[argh(option)]
    pub flats_export: Option<String>,
    /// PLAYPAL entry used when rendering, 0-13
    #[argh(option, default = "0")]
    pub palette: usize,
}

impl CliOptions {
    pub fn wants_graphics(&self) -> bool {
        self.sprites_export.is_some()
            || self.patches_export.is_some()
            || self.flats_export.is_some()
    }
}

impl From<&CliOptions> for DecodeOptions {
    fn from(options: &CliOptions) -> Self {
        Self {
            maps: options.mapsinfo || options.mapsinfo_dump.is_some(),
            graphics: options.wants_graphics(),
            music: options.musicinfo
                || options.musicinfo_dump.is_some()
                || options.music_export.is_some(),
            palette: options.palette,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliOptions;
    use argh::FromArgs;
    use wad::DecodeOptions;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::from_args(&["wadex"], args).unwrap()
    }

    #[test]
    fn only_requested_parts_are_decoded() {
        let options = parse(&["doom1.wad", "--mapsinfo"]);
        assert_eq!(options.wads, vec!["doom1.wad".to_string()]);
        let decode = DecodeOptions::from(&options);
        assert!(decode.maps);
        assert!(!decode.graphics);
        assert!(!decode.music);
        assert_eq!(decode.music_prefix, "D_");
    }

    #[test]
    fn exports_enable_decoding() {
        let options = parse(&[
            "a.wad",
            "b.wad",
            "--flats-export",
            "out/flats",
            "--music-export",
            "out/music",
            "--palette",
            "3",
        ]);
        assert_eq!(options.wads.len(), 2);
        let decode = DecodeOptions::from(&options);
        assert!(decode.graphics);
        assert!(decode.music);
        assert!(!decode.maps);
        assert_eq!(decode.palette, 3);
    }
}
