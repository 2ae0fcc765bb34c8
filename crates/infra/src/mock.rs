//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! subway-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! DB の一意制約・外部キー制約に相当する競合は、PostgreSQL 実装と同じく
//! `InfraError::conflict` で返す。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use subway_domain::{
    line::{Line, LineId},
    section::{Section, SectionId},
    station::{Station, StationId},
};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    repository::{LineRepository, SectionRepository, StationRepository},
};

// ===== MockTransactionManager =====

/// テスト用の TransactionManager
///
/// `TxContext::mock()` を返す。
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}

// ===== MockStationRepository =====

#[derive(Clone, Default)]
pub struct MockStationRepository {
    stations: Arc<Mutex<Vec<Station>>>,
    /// 駅の削除時に参照チェックに使用する区間ストア
    sections: Option<MockSectionRepository>,
}

impl MockStationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 区間ストアを共有し、参照されている駅の削除を競合にする
    pub fn with_sections(sections: MockSectionRepository) -> Self {
        Self {
            stations: Arc::default(),
            sections: Some(sections),
        }
    }

    pub fn add_station(&self, station: Station) {
        self.stations.lock().unwrap().push(station);
    }
}

#[async_trait]
impl StationRepository for MockStationRepository {
    async fn find_all(&self) -> Result<Vec<Station>, InfraError> {
        let mut stations = self.stations.lock().unwrap().clone();
        stations.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(stations)
    }

    async fn find_by_id(&self, id: &StationId) -> Result<Option<Station>, InfraError> {
        Ok(self
            .stations
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn insert(&self, _tx: &mut TxContext, station: &Station) -> Result<(), InfraError> {
        let mut stations = self.stations.lock().unwrap();
        if stations.iter().any(|s| s.name() == station.name()) {
            return Err(InfraError::conflict("Station", station.name().as_str()));
        }
        stations.push(station.clone());
        Ok(())
    }

    async fn delete(&self, _tx: &mut TxContext, id: &StationId) -> Result<(), InfraError> {
        if self.sections.as_ref().is_some_and(|s| s.references(id)) {
            return Err(InfraError::conflict("Station", id.to_string()));
        }
        self.stations.lock().unwrap().retain(|s| s.id() != id);
        Ok(())
    }
}

// ===== MockLineRepository =====

#[derive(Clone, Default)]
pub struct MockLineRepository {
    lines: Arc<Mutex<Vec<Line>>>,
}

impl MockLineRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&self, line: Line) {
        self.lines.lock().unwrap().push(line);
    }
}

#[async_trait]
impl LineRepository for MockLineRepository {
    async fn find_all(&self) -> Result<Vec<Line>, InfraError> {
        let mut lines = self.lines.lock().unwrap().clone();
        lines.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(lines)
    }

    async fn find_by_id(&self, id: &LineId) -> Result<Option<Line>, InfraError> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id() == id)
            .cloned())
    }

    async fn insert(&self, _tx: &mut TxContext, line: &Line) -> Result<(), InfraError> {
        let mut lines = self.lines.lock().unwrap();
        if lines.iter().any(|l| l.name() == line.name()) {
            return Err(InfraError::conflict("Line", line.name().as_str()));
        }
        lines.push(line.clone());
        Ok(())
    }

    async fn update(&self, _tx: &mut TxContext, line: &Line) -> Result<(), InfraError> {
        let mut lines = self.lines.lock().unwrap();
        if lines
            .iter()
            .any(|l| l.id() != line.id() && l.name() == line.name())
        {
            return Err(InfraError::conflict("Line", line.name().as_str()));
        }
        if let Some(pos) = lines.iter().position(|l| l.id() == line.id()) {
            lines[pos] = line.clone();
        }
        Ok(())
    }

    async fn delete(&self, _tx: &mut TxContext, id: &LineId) -> Result<(), InfraError> {
        self.lines.lock().unwrap().retain(|l| l.id() != id);
        Ok(())
    }
}

// ===== MockSectionRepository =====

#[derive(Clone, Default)]
pub struct MockSectionRepository {
    sections: Arc<Mutex<Vec<Section>>>,
}

impl MockSectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&self, section: Section) {
        self.sections.lock().unwrap().push(section);
    }

    /// 保存されている区間の件数
    pub fn count(&self) -> usize {
        self.sections.lock().unwrap().len()
    }

    fn references(&self, station_id: &StationId) -> bool {
        self.sections
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.touches(station_id))
    }
}

#[async_trait]
impl SectionRepository for MockSectionRepository {
    async fn find_by_line(&self, line_id: &LineId) -> Result<Vec<Section>, InfraError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.line_id() == line_id)
            .cloned()
            .collect())
    }

    async fn find_by_lines(&self, line_ids: &[LineId]) -> Result<Vec<Section>, InfraError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| line_ids.contains(s.line_id()))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        line_id: &LineId,
        id: &SectionId,
    ) -> Result<Option<Section>, InfraError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id && s.line_id() == line_id)
            .cloned())
    }

    async fn find_by_stations(
        &self,
        line_id: &LineId,
        up_station_id: &StationId,
        down_station_id: &StationId,
    ) -> Result<Option<Section>, InfraError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.line_id() == line_id && s.connects(up_station_id, down_station_id))
            .cloned())
    }

    async fn find_by_down_station(
        &self,
        line_id: &LineId,
        station_id: &StationId,
    ) -> Result<Option<Section>, InfraError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.line_id() == line_id && s.down_station_id() == station_id)
            .cloned())
    }

    async fn exists_by_station(&self, station_id: &StationId) -> Result<bool, InfraError> {
        Ok(self.references(station_id))
    }

    async fn insert_if_absent(
        &self,
        _tx: &mut TxContext,
        section: &Section,
    ) -> Result<bool, InfraError> {
        let mut sections = self.sections.lock().unwrap();
        let exists = sections.iter().any(|s| {
            s.line_id() == section.line_id()
                && s.connects(section.up_station_id(), section.down_station_id())
        });
        if exists {
            return Ok(false);
        }
        sections.push(section.clone());
        Ok(true)
    }

    async fn delete(
        &self,
        _tx: &mut TxContext,
        line_id: &LineId,
        id: &SectionId,
    ) -> Result<(), InfraError> {
        self.sections
            .lock()
            .unwrap()
            .retain(|s| !(s.id() == id && s.line_id() == line_id));
        Ok(())
    }

    async fn delete_by_line(&self, _tx: &mut TxContext, line_id: &LineId) -> Result<(), InfraError> {
        self.sections
            .lock()
            .unwrap()
            .retain(|s| s.line_id() != line_id);
        Ok(())
    }
}
