//! CPU-space system bus.
//!
//! ```text
//! $0000-$1FFF  2 KiB internal RAM, mirrored every $0800
//! $2000-$3FFF  8 PPU registers, mirrored every 8 bytes
//! $4000-$4013  APU channel registers
//! $4014        OAM DMA trigger
//! $4015        APU status/enable
//! $4016        controller strobe / controller 1 data
//! $4017        APU frame counter / controller 2 data
//! $4020-$5FFF  unmapped (reads as 0)
//! $6000-$7FFF  8 KiB cartridge work RAM
//! $8000-$FFFF  mapper PRG window
//! ```

use crate::input::Controller;
use crate::picture::PictureBus;
use famicore_apu::Apu;
use famicore_cpu::Bus;
use famicore_mappers::Mapper;
use famicore_ppu::Ppu;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the CPU can address, plus the PPU/APU tick drivers.
#[derive(Debug)]
pub struct SystemBus {
    ram: [u8; 0x800],
    work_ram: [u8; 0x2000],
    /// The PPU; stepped against the picture bus three times per tick.
    pub ppu: Ppu,
    /// The APU; stepped once per tick.
    pub apu: Apu,
    picture: PictureBus,
    mapper: Rc<RefCell<Mapper>>,
    /// Controller ports 1 and 2.
    pub controllers: [Controller; 2],
    oam_dma_page: Option<u8>,
}

impl SystemBus {
    /// Assemble the bus around a shared mapper handle.
    #[must_use]
    pub fn new(mapper: Rc<RefCell<Mapper>>, apu: Apu) -> Self {
        let picture = PictureBus::new(Rc::clone(&mapper));
        Self {
            ram: [0; 0x800],
            work_ram: [0; 0x2000],
            ppu: Ppu::new(),
            apu,
            picture,
            mapper,
            controllers: [Controller::new(), Controller::new()],
            oam_dma_page: None,
        }
    }

    /// Advance the PPU one dot.
    pub fn tick_ppu(&mut self) {
        self.ppu.step(&mut self.picture);
    }

    /// Advance the APU one CPU cycle. Returns DMC DMA stall cycles.
    pub fn tick_apu(&mut self) -> u32 {
        let mapper = Rc::clone(&self.mapper);
        let work_ram = &self.work_ram;
        let stall = self.apu.clock(|addr| match addr {
            0x6000..=0x7FFF => work_ram[usize::from(addr - 0x6000)],
            0x8000..=0xFFFF => mapper.borrow().read_prg(addr),
            _ => 0,
        });
        u32::from(stall)
    }

    /// Drain a pending $4014 write.
    pub fn take_oam_dma(&mut self) -> Option<u8> {
        self.oam_dma_page.take()
    }

    /// Read-only view of one 256-byte page for bulk OAM DMA.
    /// `None` for register and cartridge-ROM space.
    #[must_use]
    pub fn page(&self, page: u8) -> Option<&[u8; 256]> {
        let addr = u16::from(page) << 8;
        match addr {
            0x0000..=0x1FFF => {
                let start = usize::from(addr & 0x07FF);
                self.ram[start..start + 256].try_into().ok()
            }
            0x6000..=0x7FFF => {
                let start = usize::from(addr - 0x6000);
                self.work_ram[start..start + 256].try_into().ok()
            }
            _ => None,
        }
    }

    /// Copy one page into OAM. Pages without a direct window (register
    /// or cartridge space) are gathered byte-by-byte through the bus so
    /// the copy law holds everywhere.
    pub fn run_oam_dma(&mut self, page: u8) {
        let window = if let Some(window) = self.page(page) {
            *window
        } else {
            let base = u16::from(page) << 8;
            let mut window = [0u8; 256];
            for (i, byte) in window.iter_mut().enumerate() {
                *byte = self.read(base + i as u16);
            }
            window
        };
        self.ppu.oam_dma(&window);
    }

    /// Peek without side effects (RAM and cartridge space only;
    /// registers report 0).
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x6000..=0x7FFF => self.work_ram[usize::from(addr - 0x6000)],
            0x8000..=0xFFFF => self.mapper.borrow().read_prg(addr),
            _ => 0,
        }
    }

    /// The PPU-space bus (for tests and debug front-ends).
    pub fn picture_mut(&mut self) -> &mut PictureBus {
        &mut self.picture
    }
}

impl Bus for SystemBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x2000..=0x3FFF => match addr & 7 {
                2 => self.ppu.read_status(),
                4 => self.ppu.read_oam_data(),
                7 => self.ppu.read_data(&mut self.picture),
                // Write-only registers read back as open bus; the core
                // pins open bus to 0 for determinism.
                _ => 0,
            },
            0x4015 => self.apu.read_status(),
            0x4016 => self.controllers[0].read(),
            0x4017 => self.controllers[1].read(),
            0x4000..=0x401F => 0,
            0x4020..=0x5FFF => 0,
            0x6000..=0x7FFF => self.work_ram[usize::from(addr - 0x6000)],
            0x8000..=0xFFFF => self.mapper.borrow().read_prg(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)] = value,
            0x2000..=0x3FFF => match addr & 7 {
                0 => self.ppu.write_ctrl(value),
                1 => self.ppu.write_mask(value),
                2 => {} // Status is read-only.
                3 => self.ppu.write_oam_addr(value),
                4 => self.ppu.write_oam_data(value),
                5 => self.ppu.write_scroll(value),
                6 => self.ppu.write_addr(value),
                _ => self.ppu.write_data(&mut self.picture, value),
            },
            0x4014 => self.oam_dma_page = Some(value),
            0x4016 => {
                self.controllers[0].write_strobe(value);
                self.controllers[1].write_strobe(value);
            }
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write(addr, value),
            0x4018..=0x401F | 0x4020..=0x5FFF => {} // Unmapped; dropped.
            0x6000..=0x7FFF => self.work_ram[usize::from(addr - 0x6000)] = value,
            0x8000..=0xFFFF => {
                let mut mapper = self.mapper.borrow_mut();
                mapper.write_prg(addr, value);
                let rewire = mapper.take_mirroring_changed();
                drop(mapper);
                if rewire {
                    self.picture.update_mirroring();
                }
            }
        }
    }
}
