use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use num_traits::FromPrimitive;

use crate::{
    binaries::{BinaryData, Tag},
    chunks,
    config::DecodeConfig,
    consts::{ChunkId, POF_MAGIC},
    error::{PofError, Result},
    hierarchy::resolve_details,
    model::{PofModel, WeaponClass},
};

/// Magic and version.
const FILE_HEADER_LEN: u64 = 8;

/// A chunk whose handler stopped short of the declared length. The reader
/// skips the remainder and carries on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ToleratedGap {
    pub tag: Tag,
    /// Cursor after the handler returned.
    pub position: u64,
    /// Declared end of the chunk.
    pub next: u64,
}

/// Reads a model from any seekable source. The file header is checked on
/// construction, chunks are only read by [`PofReader::read_model`].
pub struct PofReader<R> {
    buffer: BufReader<R>,
    file_len: u64,
    config: DecodeConfig,
    gaps: Vec<ToleratedGap>,
}

impl PofReader<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> PofReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        let mut buffer = BufReader::new(reader);

        let file_len = buffer.seek(SeekFrom::End(0))?;
        buffer.seek(SeekFrom::Start(0))?;
        log::info!("file size : {file_len}");

        let magic = Tag::read(&mut buffer)?;
        if magic != POF_MAGIC {
            return Err(PofError::BadMagic(magic));
        }

        let version = i32::read(&mut buffer)?;
        log::info!("file id : {magic}, file version : {version}");

        Ok(Self {
            buffer,
            file_len,
            config: DecodeConfig::for_version(version),
            gaps: Vec::new(),
        })
    }

    pub fn version(&self) -> i32 {
        self.config.version
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Gaps skipped by the last [`PofReader::read_model`].
    pub fn tolerated_gaps(&self) -> &[ToleratedGap] {
        &self.gaps
    }

    /// Reads every chunk and resolves the hierarchy. Any error aborts the
    /// whole model.
    pub fn read_model(&mut self) -> Result<PofModel> {
        self.buffer.seek(SeekFrom::Start(FILE_HEADER_LEN))?;
        self.gaps.clear();

        let mut model = PofModel::new(self.config.version);

        while self.buffer.stream_position()? < self.file_len {
            self.read_next_chunk(&mut model)?;
        }

        resolve_details(&mut model)?;
        Ok(model)
    }

    fn read_next_chunk(&mut self, model: &mut PofModel) -> Result<()> {
        let offset = self.buffer.stream_position()?;
        let tag = Tag::read(&mut self.buffer)?;
        let len = i32::read(&mut self.buffer)?;
        log::info!("chunk : {tag} ({len})");

        let len = u64::try_from(len).map_err(|_| PofError::NegativeCount {
            what: "chunk length",
            value: len,
        })?;
        let next = self.buffer.stream_position()? + len;
        if next > self.file_len {
            return Err(PofError::ChunkOverrun {
                tag,
                next,
                file_len: self.file_len,
            });
        }

        let id = ChunkId::from_u32(tag.value()).ok_or(PofError::UnknownChunk { tag, offset })?;
        self.read_chunk(id, len, next, model)?;

        let position = self.buffer.stream_position()?;
        if position > next {
            return Err(PofError::ChunkOverread {
                tag,
                position,
                next,
            });
        }
        if position < next {
            log::warn!(
                "chunk {tag} not fully read, skipping {} bytes (offset : {position} < {next})",
                next - position
            );
            self.gaps.push(ToleratedGap {
                tag,
                position,
                next,
            });
            self.buffer.seek_relative((next - position) as i64)?;
        }
        Ok(())
    }

    fn read_chunk(&mut self, id: ChunkId, len: u64, next: u64, model: &mut PofModel) -> Result<()> {
        let buffer = &mut self.buffer;
        match id {
            ChunkId::Ohdr => return Err(PofError::UnsupportedChunk(id.tag())),
            ChunkId::Hdr2 => chunks::read_header(buffer, &self.config, model)?,
            ChunkId::Txtr => model.textures = chunks::read_textures(buffer)?,
            ChunkId::Shld => model.shield = chunks::read_shield(buffer)?,
            ChunkId::Sobj | ChunkId::Obj2 => chunks::read_subobject(buffer, id, model)?,
            ChunkId::Gpnt => chunks::read_gun_points(buffer, WeaponClass::Primary, model)?,
            ChunkId::Mpnt => chunks::read_gun_points(buffer, WeaponClass::Secondary, model)?,
            ChunkId::Tgun => chunks::read_turrets(buffer, WeaponClass::Primary, model)?,
            ChunkId::Tmis => chunks::read_turrets(buffer, WeaponClass::Secondary, model)?,
            ChunkId::Spcl => model.subsystems = chunks::read_subsystems(buffer)?,
            ChunkId::Dock => model.docks = chunks::read_docks(buffer)?,
            ChunkId::Path => chunks::skip_paths(buffer)?,
            ChunkId::Fuel => model.thrusters = chunks::read_thrusters(buffer, &self.config)?,
            ChunkId::Pinf => {
                let remaining = next - buffer.stream_position()?;
                chunks::read_info(buffer, remaining as usize)?;
            }
            ChunkId::Eye => model.eye = chunks::read_eye(buffer)?,
            ChunkId::Insg => chunks::peek_insignia(buffer)?,
            ChunkId::Acen => model.autocenter = chunks::read_autocenter(buffer, len)?,
        }
        Ok(())
    }
}

/// Opens and decodes the model at `path`.
pub fn load_pof(path: &Path) -> Result<PofModel> {
    PofReader::open(path)?.read_model()
}
